//! JSON Export functionality
//!
//! Exports categories, entries and the current ledger figures as one
//! versioned document.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BenefitError, BenefitResult};
use crate::models::{Category, CategoryId, ExpenseEntry, Money};
use crate::services::ledger;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub categories: Vec<Category>,

    /// Entries, newest first
    pub entries: Vec<ExpenseEntry>,

    /// Current-period figures per category
    pub ledger: Vec<LedgerLine>,

    pub metadata: ExportMetadata,
}

/// Ledger figures for one category at export time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerLine {
    pub category_id: CategoryId,
    /// Renewal window label, e.g. "2025" or "2025-2027"
    pub period: String,
    pub budget: Money,
    pub reimbursed: Money,
    pub remaining: Money,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub as_of: NaiveDate,
    pub category_count: usize,
    pub entry_count: usize,
    pub earliest_entry: Option<NaiveDate>,
    pub latest_entry: Option<NaiveDate>,
    /// Reimbursed in the current windows, all categories
    pub total_reimbursed: Money,
    /// Budget left in the current windows, all categories
    pub total_remaining: Money,
}

impl FullExport {
    /// Build an export from storage with ledger figures as of `now`
    pub fn from_storage(storage: &Storage, now: NaiveDate) -> BenefitResult<Self> {
        let categories = storage.categories.get_all()?;
        let entries = storage.entries.get_all()?;
        Ok(Self::build(categories, entries, now))
    }

    fn build(categories: Vec<Category>, entries: Vec<ExpenseEntry>, now: NaiveDate) -> Self {
        let snapshot = ledger::snapshot(&categories, &entries, now);

        let ledger = categories
            .iter()
            .filter_map(|c| {
                snapshot.get(&c.id).map(|balance| LedgerLine {
                    category_id: c.id.clone(),
                    period: balance.period_key.to_string(),
                    budget: c.budget,
                    reimbursed: balance.total,
                    remaining: balance.remaining,
                })
            })
            .collect();

        let metadata = ExportMetadata {
            as_of: now,
            category_count: categories.len(),
            entry_count: entries.len(),
            earliest_entry: entries.iter().map(|e| e.date).min(),
            latest_entry: entries.iter().map(|e| e.date).max(),
            total_reimbursed: snapshot.total_reimbursed(),
            total_remaining: snapshot.total_remaining(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            entries,
            ledger,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let category_ids: HashSet<_> = self.categories.iter().map(|c| &c.id).collect();
        if category_ids.len() != self.categories.len() {
            return Err("Duplicate category IDs".to_string());
        }

        for category in &self.categories {
            category
                .validate()
                .map_err(|e| format!("Category {}: {}", category.id, e))?;
        }

        for entry in &self.entries {
            entry
                .validate()
                .map_err(|e| format!("Entry {}: {}", entry.id.short(), e))?;
        }

        Ok(())
    }
}

/// Export everything to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
    now: NaiveDate,
) -> BenefitResult<()> {
    let export = FullExport::from_storage(storage, now)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BenefitError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a JSON export
pub fn import_from_json(json_str: &str) -> BenefitResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| BenefitError::Import(e.to_string()))?;

    export.validate().map_err(BenefitError::Import)?;

    Ok(export)
}
