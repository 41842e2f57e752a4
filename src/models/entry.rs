//! Expense entries
//!
//! An entry records one invoice submitted against a benefit category together
//! with the reimbursement computed at submission time. Entries are never
//! edited afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, EntryId};
use super::money::Money;

/// A committed expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Invoice date
    pub date: NaiveDate,

    /// Owning category
    pub category_id: CategoryId,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Raw invoice amount
    pub amount: Money,

    /// Insurer share computed at submission
    pub reimbursed: Money,

    /// When the entry was submitted
    pub created_at: DateTime<Utc>,
}

impl ExpenseEntry {
    /// Create a new entry
    pub fn new(
        date: NaiveDate,
        category_id: CategoryId,
        description: impl Into<String>,
        amount: Money,
        reimbursed: Money,
    ) -> Self {
        Self {
            id: EntryId::new(),
            date,
            category_id,
            description: description.into(),
            amount,
            reimbursed,
            created_at: Utc::now(),
        }
    }

    /// The part of the invoice not covered by the insurer
    pub fn self_pay(&self) -> Money {
        (self.amount - self.reimbursed).non_negative()
    }

    /// Validate the entry invariants
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.amount.is_negative() {
            return Err(EntryValidationError::NegativeAmount);
        }
        if self.reimbursed.is_negative() || self.reimbursed > self.amount {
            return Err(EntryValidationError::ReimbursementOutOfRange);
        }
        Ok(())
    }
}

/// An expense that has not been committed yet
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub category_id: CategoryId,
    pub description: String,
    pub amount: Money,
}

impl ExpenseDraft {
    pub fn new(
        date: NaiveDate,
        category_id: impl Into<CategoryId>,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            category_id: category_id.into(),
            description: description.into(),
            amount,
        }
    }
}

/// Validation errors for entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    NegativeAmount,
    ReimbursementOutOfRange,
}

impl std::fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Invoice amount cannot be negative"),
            Self::ReimbursementOutOfRange => {
                write!(f, "Reimbursed amount must be between zero and the invoice amount")
            }
        }
    }
}

impl std::error::Error for EntryValidationError {}
