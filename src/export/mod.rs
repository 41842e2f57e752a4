//! Export module for the benefits tracker
//!
//! - CSV: one row per entry, spreadsheet-compatible
//! - JSON: full versioned export including ledger figures
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_entries_csv, read_entries_csv, write_entries_csv, ExportRow};
pub use json::{export_full_json, import_from_json, FullExport, LedgerLine, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
