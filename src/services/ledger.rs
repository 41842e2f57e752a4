//! Budget ledger
//!
//! Computes, for every category, how much has been reimbursed in the renewal
//! window containing `now` and how much budget remains. The ledger is a pure
//! function of its inputs and is recomputed on every read; old entries stay
//! stored but stop counting once their window has rolled over.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Category, CategoryId, ExpenseEntry, Money, PeriodKey};

/// Current-period figures for one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryBalance {
    /// Renewal window containing `now`
    pub period_key: PeriodKey,
    /// Sum of reimbursements in that window
    pub total: Money,
    /// Budget cap minus total, never negative
    pub remaining: Money,
    /// Share of the cap already used, within [0, 100]
    pub progress_percent: f64,
}

impl CategoryBalance {
    fn new(category: &Category, period_key: PeriodKey, total: Money) -> Self {
        let remaining = (category.budget - total).non_negative();
        let progress_percent = if category.budget.is_positive() {
            (total.as_f64() / category.budget.as_f64() * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            period_key,
            total,
            remaining,
            progress_percent,
        }
    }
}

/// Per-category balances at a point in time
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    balances: HashMap<CategoryId, CategoryBalance>,
}

impl LedgerSnapshot {
    /// Balance of one category, if it exists
    pub fn get(&self, id: &CategoryId) -> Option<&CategoryBalance> {
        self.balances.get(id)
    }

    /// Remaining budget of one category, if it exists
    pub fn remaining(&self, id: &CategoryId) -> Option<Money> {
        self.balances.get(id).map(|b| b.remaining)
    }

    /// Number of categories in the snapshot
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Iterate over all balances
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &CategoryBalance)> {
        self.balances.iter()
    }

    /// Sum of current-period reimbursements across all categories
    pub fn total_reimbursed(&self) -> Money {
        self.balances.values().map(|b| b.total).sum()
    }

    /// Sum of remaining budget across all categories
    pub fn total_remaining(&self) -> Money {
        self.balances.values().map(|b| b.remaining).sum()
    }
}

/// Compute the ledger snapshot for `now`
///
/// Entries whose category no longer exists are skipped.
pub fn snapshot(categories: &[Category], entries: &[ExpenseEntry], now: NaiveDate) -> LedgerSnapshot {
    let by_id: HashMap<&CategoryId, (&Category, PeriodKey)> = categories
        .iter()
        .map(|c| (&c.id, (c, c.period.key_for(now))))
        .collect();

    let mut totals: HashMap<&CategoryId, Money> =
        categories.iter().map(|c| (&c.id, Money::zero())).collect();

    for entry in entries {
        let Some((category, now_key)) = by_id.get(&entry.category_id) else {
            debug!(entry = %entry.id, category = %entry.category_id, "skipping orphaned entry");
            continue;
        };

        if category.period.key_for(entry.date) == *now_key {
            if let Some(total) = totals.get_mut(&entry.category_id) {
                *total += entry.reimbursed;
            }
        }
    }

    let balances = categories
        .iter()
        .map(|category| {
            let (_, now_key) = by_id[&category.id];
            let total = totals.get(&category.id).copied().unwrap_or_default();
            (
                category.id.clone(),
                CategoryBalance::new(category, now_key, total),
            )
        })
        .collect();

    LedgerSnapshot { balances }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RenewalPeriod;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn category(id: &str, budget: i64, period: RenewalPeriod) -> Category {
        Category::new(id, id, 1.0, Money::from_units(budget), period)
    }

    fn entry(id: &str, on: NaiveDate, reimbursed: i64) -> ExpenseEntry {
        ExpenseEntry::new(
            on,
            CategoryId::from(id),
            "",
            Money::from_units(reimbursed),
            Money::from_units(reimbursed),
        )
    }

    #[test]
    fn test_empty_ledger_has_full_budget() {
        let categories = vec![category("vorsorge", 1000, RenewalPeriod::Yearly)];
        let snap = snapshot(&categories, &[], date(2025, 5, 1));

        let balance = snap.get(&CategoryId::from("vorsorge")).unwrap();
        assert_eq!(balance.total, Money::zero());
        assert_eq!(balance.remaining, Money::from_units(1000));
        assert_eq!(balance.progress_percent, 0.0);
        assert_eq!(balance.period_key, PeriodKey::Year(2025));
    }

    #[test]
    fn test_only_current_year_counts() {
        let categories = vec![category("vorsorge", 1000, RenewalPeriod::Yearly)];
        let entries = vec![
            entry("vorsorge", date(2024, 12, 31), 400),
            entry("vorsorge", date(2025, 1, 1), 250),
            entry("vorsorge", date(2025, 6, 30), 50),
        ];
        let snap = snapshot(&categories, &entries, date(2025, 7, 1));

        let balance = snap.get(&CategoryId::from("vorsorge")).unwrap();
        assert_eq!(balance.total, Money::from_units(300));
        assert_eq!(balance.remaining, Money::from_units(700));
        assert!((balance.progress_percent - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_consecutive_triennial_blocks_are_independent() {
        let categories = vec![category("sehhilfen", 300, RenewalPeriod::Triennial)];
        let entries = vec![
            entry("sehhilfen", date(2024, 11, 1), 300),
            entry("sehhilfen", date(2025, 2, 1), 120),
        ];
        let id = CategoryId::from("sehhilfen");

        let in_old_block = snapshot(&categories, &entries, date(2024, 12, 1));
        assert_eq!(in_old_block.get(&id).unwrap().total, Money::from_units(300));
        assert_eq!(in_old_block.remaining(&id), Some(Money::zero()));

        let in_new_block = snapshot(&categories, &entries, date(2025, 3, 1));
        assert_eq!(in_new_block.get(&id).unwrap().total, Money::from_units(120));
        assert_eq!(in_new_block.remaining(&id), Some(Money::from_units(180)));
    }

    #[test]
    fn test_unbounded_counts_everything() {
        let categories = vec![category("any", 500, RenewalPeriod::Unbounded)];
        let entries = vec![
            entry("any", date(2001, 1, 1), 100),
            entry("any", date(2030, 1, 1), 100),
        ];
        let snap = snapshot(&categories, &entries, date(2015, 1, 1));
        assert_eq!(snap.get(&CategoryId::from("any")).unwrap().total, Money::from_units(200));
    }

    #[test]
    fn test_overspent_clamps_remaining_and_progress() {
        let categories = vec![category("vorsorge", 100, RenewalPeriod::Yearly)];
        let entries = vec![entry("vorsorge", date(2025, 1, 1), 150)];
        let snap = snapshot(&categories, &entries, date(2025, 2, 1));

        let balance = snap.get(&CategoryId::from("vorsorge")).unwrap();
        assert_eq!(balance.remaining, Money::zero());
        assert_eq!(balance.progress_percent, 100.0);
    }

    #[test]
    fn test_zero_budget_has_zero_progress() {
        let categories = vec![category("none", 0, RenewalPeriod::Yearly)];
        let entries = vec![entry("none", date(2025, 1, 1), 10)];
        let snap = snapshot(&categories, &entries, date(2025, 2, 1));

        let balance = snap.get(&CategoryId::from("none")).unwrap();
        assert_eq!(balance.progress_percent, 0.0);
        assert_eq!(balance.remaining, Money::zero());
    }

    #[test]
    fn test_orphaned_entries_are_skipped() {
        let categories = vec![category("vorsorge", 1000, RenewalPeriod::Yearly)];
        let entries = vec![
            entry("deleted", date(2025, 1, 1), 500),
            entry("vorsorge", date(2025, 1, 1), 100),
        ];
        let snap = snapshot(&categories, &entries, date(2025, 2, 1));

        assert_eq!(snap.len(), 1);
        assert!(snap.get(&CategoryId::from("deleted")).is_none());
        assert_eq!(snap.total_reimbursed(), Money::from_units(100));
    }

    #[test]
    fn test_remaining_plus_total_matches_budget_when_within_cap() {
        let categories = vec![category("vorsorge", 1000, RenewalPeriod::Yearly)];
        for spent in [0, 1, 400, 999, 1000, 1001, 5000] {
            let entries = vec![entry("vorsorge", date(2025, 1, 1), spent)];
            let snap = snapshot(&categories, &entries, date(2025, 6, 1));
            let b = snap.get(&CategoryId::from("vorsorge")).unwrap();

            assert!(!b.remaining.is_negative());
            assert!((0.0..=100.0).contains(&b.progress_percent));
            if b.total <= Money::from_units(1000) {
                assert_eq!(b.remaining + b.total, Money::from_units(1000));
            } else {
                assert_eq!(b.remaining, Money::zero());
            }
        }
    }
}
