//! Core data models for the benefits tracker
//!
//! This module contains the data structures of the benefit-accounting domain:
//! categories, expense entries, money and renewal periods.

pub mod category;
pub mod entry;
pub mod ids;
pub mod money;
pub mod period;

pub use category::{default_categories, Category, CategoryValidationError};
pub use entry::{EntryValidationError, ExpenseDraft, ExpenseEntry};
pub use ids::{CategoryId, EntryId};
pub use money::Money;
pub use period::{period_key, PeriodKey, RenewalPeriod};
