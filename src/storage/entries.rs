//! Expense entry repository for JSON storage
//!
//! Manages loading and saving the "entries" list to entries.json. Entries are
//! kept newest-first and are append-only.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BenefitError;
use crate::models::{CategoryId, EntryId, ExpenseEntry};

use super::file_io::{read_json, write_json_atomic};

/// Serializable entry data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct EntryData {
    pub entries: Vec<ExpenseEntry>,
}

/// Repository for expense entry persistence
pub struct EntryRepository {
    path: PathBuf,
    entries: RwLock<Vec<ExpenseEntry>>,
}

impl EntryRepository {
    /// Create a new entry repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Load entries from disk
    pub fn load(&self) -> Result<(), BenefitError> {
        let file_data: EntryData = read_json(&self.path)?;

        let mut entries = self
            .entries
            .write()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *entries = file_data.entries;

        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> Result<(), BenefitError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = EntryData {
            entries: entries.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Add a new entry at the front of the list
    pub fn prepend(&self, entry: ExpenseEntry) -> Result<(), BenefitError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(0, entry);
        Ok(())
    }

    /// Remove an entry that has not been persisted yet
    ///
    /// Only used to undo a `prepend` whose save failed; committed entries are
    /// immutable.
    pub(crate) fn remove(&self, id: EntryId) -> Result<Option<ExpenseEntry>, BenefitError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(entries
            .iter()
            .position(|e| e.id == id)
            .map(|index| entries.remove(index)))
    }

    /// Get an entry by ID
    pub fn get(&self, id: EntryId) -> Result<Option<ExpenseEntry>, BenefitError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    /// Get all entries, newest first
    pub fn get_all(&self) -> Result<Vec<ExpenseEntry>, BenefitError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.clone())
    }

    /// Get all entries of one category, newest first
    pub fn get_by_category(&self, category_id: &CategoryId) -> Result<Vec<ExpenseEntry>, BenefitError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries
            .iter()
            .filter(|e| &e.category_id == category_id)
            .cloned()
            .collect())
    }

    /// Count entries
    pub fn count(&self) -> Result<usize, BenefitError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, EntryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = EntryRepository::new(temp_dir.path().join("entries.json"));
        (temp_dir, repo)
    }

    fn entry(category: &str, day: u32) -> ExpenseEntry {
        ExpenseEntry::new(
            NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            CategoryId::from(category),
            "",
            Money::from_units(100),
            Money::from_units(80),
        )
    }

    #[test]
    fn test_prepend_keeps_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        let first = entry("vorsorge", 1);
        let second = entry("vorsorge", 2);
        repo.prepend(first.clone()).unwrap();
        repo.prepend(second.clone()).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[test]
    fn test_get_by_category() {
        let (_temp_dir, repo) = create_test_repo();
        repo.prepend(entry("vorsorge", 1)).unwrap();
        repo.prepend(entry("sehhilfen", 2)).unwrap();

        let vision = repo.get_by_category(&CategoryId::from("sehhilfen")).unwrap();
        assert_eq!(vision.len(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let e = entry("vorsorge", 3);
        repo.prepend(e.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = EntryRepository::new(temp_dir.path().join("entries.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(e.id).unwrap(), Some(e));
    }
}
