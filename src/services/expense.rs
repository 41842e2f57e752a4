//! Expense service
//!
//! Submits drafts as committed entries: looks up the category, asks the ledger
//! for the remaining budget at submission time, computes the reimbursement,
//! stores the entry and persists.
//!
//! Two submissions against the same stale snapshot can both be reimbursed
//! from the same remaining figure. Single-user, single-device use makes this
//! acceptable and it is not guarded against.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{BenefitError, BenefitResult};
use crate::models::{Category, ExpenseDraft, ExpenseEntry, Money};
use crate::services::ledger::{self, LedgerSnapshot};
use crate::services::reimbursement::{compute_reimbursement, Reimbursement};
use crate::storage::Storage;

/// Outcome of a submission before or after committing
#[derive(Debug, Clone, PartialEq)]
pub struct ReimbursementPreview {
    pub category: Category,
    pub amount: Money,
    pub remaining_before: Money,
    pub reimbursement: Reimbursement,
}

impl ReimbursementPreview {
    /// Remaining budget once this expense is booked
    pub fn remaining_after(&self) -> Money {
        (self.remaining_before - self.reimbursement.reimbursed).non_negative()
    }
}

/// Service for submitting and listing expenses
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Ledger snapshot for `now` from the current storage contents
    pub fn snapshot(&self, now: NaiveDate) -> BenefitResult<LedgerSnapshot> {
        let categories = self.storage.categories.get_all()?;
        let entries = self.storage.entries.get_all()?;
        Ok(ledger::snapshot(&categories, &entries, now))
    }

    /// Compute what a draft would be reimbursed without storing it
    pub fn preview(&self, draft: &ExpenseDraft, now: NaiveDate) -> BenefitResult<ReimbursementPreview> {
        let category = self
            .storage
            .categories
            .get(&draft.category_id)?
            .ok_or_else(|| BenefitError::category_not_found(draft.category_id.to_string()))?;

        if draft.amount.is_negative() {
            return Err(BenefitError::InvalidAmount(format!(
                "invoice amount cannot be negative ({})",
                draft.amount.to_decimal_string()
            )));
        }

        let remaining_before = self
            .snapshot(now)?
            .remaining(&category.id)
            .unwrap_or(category.budget);

        let reimbursement = compute_reimbursement(&category, draft.amount, remaining_before)?;

        Ok(ReimbursementPreview {
            category,
            amount: draft.amount,
            remaining_before,
            reimbursement,
        })
    }

    /// Commit a draft as a new entry and persist it
    pub fn submit(&self, draft: ExpenseDraft, now: NaiveDate) -> BenefitResult<ExpenseEntry> {
        let preview = self.preview(&draft, now)?;

        let entry = ExpenseEntry::new(
            draft.date,
            draft.category_id,
            draft.description.trim(),
            draft.amount,
            preview.reimbursement.reimbursed,
        );

        entry
            .validate()
            .map_err(|e| BenefitError::Validation(e.to_string()))?;

        self.storage.entries.prepend(entry.clone())?;
        if let Err(e) = self.storage.entries.save() {
            warn!(entry = %entry.id, error = %e, "save failed, discarding entry");
            self.storage.entries.remove(entry.id)?;
            return Err(e);
        }

        info!(
            entry = %entry.id,
            category = %entry.category_id,
            amount = %entry.amount,
            reimbursed = %entry.reimbursed,
            "submitted expense"
        );

        Ok(entry)
    }

    /// List entries newest first, optionally for one category
    pub fn list(&self, category: Option<&Category>) -> BenefitResult<Vec<ExpenseEntry>> {
        match category {
            Some(c) => self.storage.entries.get_by_category(&c.id),
            None => self.storage.entries.get_all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BenefitPaths;
    use crate::models::CategoryId;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BenefitPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_submit_caps_at_remaining_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let now = date(2025, 3, 1);

        let draft = ExpenseDraft::new(now, "sehhilfen", "Neue Brille", Money::from_units(500));
        let entry = service.submit(draft, now).unwrap();

        assert_eq!(entry.reimbursed, Money::from_units(300));
        assert_eq!(entry.self_pay(), Money::from_units(200));

        let second = ExpenseDraft::new(now, "sehhilfen", "Kontaktlinsen", Money::from_units(90));
        let entry = service.submit(second, now).unwrap();
        assert_eq!(entry.reimbursed, Money::zero());
    }

    #[test]
    fn test_failed_save_discards_entry() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let now = date(2025, 3, 1);

        // Block the temp file so the atomic write cannot start
        let temp_path = storage.paths().entries_file().with_extension("json.tmp");
        std::fs::create_dir_all(&temp_path).unwrap();

        let draft = ExpenseDraft::new(now, "sehhilfen", "Brille", Money::from_units(200));
        let err = service.submit(draft, now).unwrap_err();
        assert!(matches!(err, BenefitError::Storage(_)));

        assert_eq!(storage.entries.count().unwrap(), 0);
        let remaining = service
            .snapshot(now)
            .unwrap()
            .remaining(&CategoryId::from("sehhilfen"));
        assert_eq!(remaining, Some(Money::from_units(300)));
    }

    #[test]
    fn test_submit_persists_newest_first() {
        let (temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let now = date(2025, 3, 1);

        service
            .submit(ExpenseDraft::new(now, "vorsorge", "A", Money::from_units(100)), now)
            .unwrap();
        let second = service
            .submit(ExpenseDraft::new(now, "vorsorge", "B", Money::from_units(100)), now)
            .unwrap();

        let paths = BenefitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        let entries = reloaded.entries.get_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, second.id);
    }

    #[test]
    fn test_submit_unknown_category_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let now = date(2025, 3, 1);

        let draft = ExpenseDraft::new(now, "zahnarzt", "", Money::from_units(100));
        let err = service.submit(draft, now).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(storage.entries.count().unwrap(), 0);
    }

    #[test]
    fn test_submit_negative_amount_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let now = date(2025, 3, 1);

        let draft = ExpenseDraft::new(now, "vorsorge", "", Money::from_cents(-500));
        let err = service.submit(draft, now).unwrap_err();
        assert!(matches!(err, BenefitError::InvalidAmount(_)));
    }

    #[test]
    fn test_budget_resets_in_next_triennial_block() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let old = date(2024, 6, 1);
        service
            .submit(ExpenseDraft::new(old, "sehhilfen", "", Money::from_units(300)), old)
            .unwrap();

        let new = date(2025, 6, 1);
        let preview = service
            .preview(&ExpenseDraft::new(new, "sehhilfen", "", Money::from_units(100)), new)
            .unwrap();
        assert_eq!(preview.remaining_before, Money::from_units(300));
        assert_eq!(preview.reimbursement.reimbursed, Money::from_units(100));
        assert_eq!(preview.remaining_after(), Money::from_units(200));
    }

    #[test]
    fn test_preview_does_not_persist() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let now = date(2025, 3, 1);

        let draft = ExpenseDraft::new(now, "gesundheitsfoerderung", "", Money::from_units(600));
        let preview = service.preview(&draft, now).unwrap();

        assert_eq!(preview.reimbursement.reimbursed, Money::from_units(300));
        assert_eq!(preview.reimbursement.self_pay, Money::from_units(300));
        assert_eq!(storage.entries.count().unwrap(), 0);
    }

    #[test]
    fn test_list_by_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let now = date(2025, 3, 1);

        service
            .submit(ExpenseDraft::new(now, "vorsorge", "", Money::from_units(10)), now)
            .unwrap();
        service
            .submit(ExpenseDraft::new(now, "sehhilfen", "", Money::from_units(10)), now)
            .unwrap();

        let vision = storage
            .categories
            .get(&CategoryId::from("sehhilfen"))
            .unwrap()
            .unwrap();
        assert_eq!(service.list(Some(&vision)).unwrap().len(), 1);
        assert_eq!(service.list(None).unwrap().len(), 2);
    }
}
