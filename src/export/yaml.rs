//! YAML Export functionality
//!
//! Same document as the JSON export, in a form that is easier to read by hand.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::{BenefitError, BenefitResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export everything to YAML
pub fn export_full_yaml<W: Write>(
    storage: &Storage,
    writer: &mut W,
    now: NaiveDate,
) -> BenefitResult<()> {
    let export = FullExport::from_storage(storage, now)?;
    write_yaml(&export, writer)
}

fn write_yaml<W: Write>(export: &FullExport, writer: &mut W) -> BenefitResult<()> {
    let export_err = |e: std::io::Error| BenefitError::Export(e.to_string());

    writeln!(writer, "# Benefits tracker export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, export).map_err(|e| BenefitError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export
pub fn import_from_yaml(yaml_str: &str) -> BenefitResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| BenefitError::Import(e.to_string()))?;

    export.validate().map_err(BenefitError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BenefitPaths;
    use crate::models::{ExpenseDraft, Money};
    use crate::services::ExpenseService;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BenefitPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let now = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        ExpenseService::new(&storage)
            .submit(
                ExpenseDraft::new(now, "alternativmedizin", "Akupunktur", Money::from_units(150)),
                now,
            )
            .unwrap();

        let mut out = Vec::new();
        export_full_yaml(&storage, &mut out, now).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# Benefits tracker export"));

        let imported = import_from_yaml(&text).unwrap();
        assert_eq!(imported.entries.len(), 1);
        assert_eq!(imported.entries[0].reimbursed, Money::from_units(120));
        assert_eq!(imported.metadata.total_reimbursed, Money::from_units(120));
    }
}
