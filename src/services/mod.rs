//! Service layer for the benefits tracker
//!
//! The four accounting components (period keys live in `models::period`) are
//! pure functions over plain data. `CategoryService` and `ExpenseService` wrap
//! them with storage access and persistence.

pub mod category;
pub mod expense;
pub mod interpreter;
pub mod ledger;
pub mod reimbursement;

pub use category::CategoryService;
pub use expense::{ExpenseService, ReimbursementPreview};
pub use interpreter::{interpret, InvoiceGuess, Interpreter};
pub use ledger::{snapshot, CategoryBalance, LedgerSnapshot};
pub use reimbursement::{compute_reimbursement, Reimbursement};
