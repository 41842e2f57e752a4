//! CSV export of expense entries
//!
//! One row per entry in stored order (newest first). Every field is quoted
//! and embedded quotes are doubled, so spreadsheet tools read descriptions
//! with commas or quotes unchanged.

use std::collections::HashMap;
use std::io::{Read, Write};

use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BenefitError, BenefitResult};
use crate::models::{Category, CategoryId, ExpenseEntry, Money};
use crate::storage::Storage;

/// Column header, written even when there are no entries
pub const CSV_HEADER: [&str; 6] = [
    "id",
    "date",
    "category",
    "description",
    "amountCHF",
    "reimbursedCHF",
];

/// One exported entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub id: String,
    pub date: NaiveDate,
    /// Category name, or the raw ID if the category no longer exists
    pub category: String,
    pub description: String,
    #[serde(rename = "amountCHF", with = "decimal")]
    pub amount: Money,
    #[serde(rename = "reimbursedCHF", with = "decimal")]
    pub reimbursed: Money,
}

impl ExportRow {
    fn from_entry(entry: &ExpenseEntry, names: &HashMap<&CategoryId, &str>) -> Self {
        let category = names
            .get(&entry.category_id)
            .map(|name| name.to_string())
            .unwrap_or_else(|| entry.category_id.to_string());

        Self {
            id: entry.id.to_string(),
            date: entry.date,
            category,
            description: entry.description.clone(),
            amount: entry.amount,
            reimbursed: entry.reimbursed,
        }
    }
}

/// Amounts as plain two-decimal strings ("1234.50")
mod decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::models::Money;

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&money.to_decimal_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Money::parse(&raw).map_err(de::Error::custom)
    }
}

/// Write entries as CSV, resolving category names from `categories`
pub fn write_entries_csv<W: Write>(
    categories: &[Category],
    entries: &[ExpenseEntry],
    writer: W,
) -> BenefitResult<()> {
    let names: HashMap<&CategoryId, &str> = categories
        .iter()
        .map(|c| (&c.id, c.name.as_str()))
        .collect();

    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;

    for entry in entries {
        csv_writer.serialize(ExportRow::from_entry(entry, &names))?;
    }

    csv_writer
        .flush()
        .map_err(|e| BenefitError::Export(e.to_string()))?;

    debug!(rows = entries.len(), "wrote entries CSV");
    Ok(())
}

/// Export all stored entries to CSV
pub fn export_entries_csv<W: Write>(storage: &Storage, writer: W) -> BenefitResult<()> {
    let categories = storage.categories.get_all()?;
    let entries = storage.entries.get_all()?;
    write_entries_csv(&categories, &entries, writer)
}

/// Read a CSV produced by [`write_entries_csv`]
pub fn read_entries_csv<R: Read>(reader: R) -> BenefitResult<Vec<ExportRow>> {
    ReaderBuilder::new()
        .from_reader(reader)
        .deserialize()
        .collect::<Result<Vec<ExportRow>, _>>()
        .map_err(|e| BenefitError::Import(e.to_string()))
}
