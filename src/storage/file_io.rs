//! JSON file helpers for the data directory
//!
//! `categories.json` and `entries.json` are read whole at startup and
//! rewritten whole after every change. A missing file reads as empty, which is
//! how a first run starts before the default categories are seeded. Writes go
//! through a sibling `*.json.tmp` file so an interrupted save leaves the
//! previous ledger intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::BenefitError;

/// Read a whole data file, or `T::default()` when it does not exist yet
///
/// A file that exists but does not parse is a `Storage` error, never an empty
/// ledger.
pub fn read_json<T, P>(path: P) -> Result<T, BenefitError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        debug!(path = %path.display(), "file missing, using empty default");
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| BenefitError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| BenefitError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Replace a data file with the pretty-printed JSON of `data`
///
/// The target is only touched by the final rename. On any error the previous
/// file is left as it was and the caller still holds the unsaved state.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BenefitError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BenefitError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| BenefitError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| BenefitError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| BenefitError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| BenefitError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BenefitError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    debug!(path = %path.display(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Records {
        items: Vec<String>,
    }

    fn records(items: &[&str]) -> Records {
        Records {
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Records = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Records::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("records.json");

        let data = records(&["a", "b"]);
        write_json_atomic(&path, &data).unwrap();

        let loaded: Records = read_json(&path).unwrap();
        assert_eq!(data, loaded);
        assert!(!temp_dir.path().join("nested").join("records.json.tmp").exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.json");
        write_json_atomic(&path, &records(&["committed"])).unwrap();

        fs::create_dir(temp_dir.path().join("entries.json.tmp")).unwrap();
        let result = write_json_atomic(&path, &records(&["committed", "lost"]));
        assert!(matches!(result, Err(BenefitError::Storage(_))));

        let loaded: Records = read_json(&path).unwrap();
        assert_eq!(loaded, records(&["committed"]));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        let result: Result<Records, _> = read_json(&path);
        assert!(matches!(result, Err(BenefitError::Storage(_))));
    }
}
