//! Storage layer for the benefits tracker
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Data is loaded once at start and saved after every mutation.

pub mod categories;
pub mod entries;
pub mod file_io;
pub mod init;

pub use categories::{CategoryData, CategoryRepository};
pub use entries::{EntryData, EntryRepository};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;

use crate::config::paths::BenefitPaths;
use crate::error::BenefitError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BenefitPaths,
    pub categories: CategoryRepository,
    pub entries: EntryRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BenefitPaths) -> Result<Self, BenefitError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            entries: EntryRepository::new(paths.entries_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BenefitPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BenefitError> {
        self.categories.load()?;
        self.entries.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BenefitError> {
        self.categories.save()?;
        self.entries.save()?;
        Ok(())
    }

    /// Check if storage has been seeded
    pub fn is_initialized(&self) -> bool {
        !init::needs_initialization(&self.paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BenefitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_load_after_initialize() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BenefitPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert!(storage.is_initialized());
        assert_eq!(storage.categories.count().unwrap(), 5);
        assert_eq!(storage.entries.count().unwrap(), 0);
    }
}
