//! Category repository for JSON storage
//!
//! Manages loading and saving the "categories" list to categories.json.
//! Order is preserved as stored so the overview lists categories the way they
//! were seeded.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BenefitError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(Vec::new()),
        }
    }

    /// Load categories from disk
    ///
    /// Fails with a validation error if any stored category is invalid.
    pub fn load(&self) -> Result<(), BenefitError> {
        let file_data: CategoryData = read_json(&self.path)?;

        for category in &file_data.categories {
            category.validate().map_err(|e| {
                BenefitError::Validation(format!(
                    "Invalid category '{}' in {}: {}",
                    category.id,
                    self.path.display(),
                    e
                ))
            })?;
        }

        let mut categories = self
            .categories
            .write()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *categories = file_data.categories;

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), BenefitError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = CategoryData {
            categories: categories.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a category by ID
    pub fn get(&self, id: &CategoryId) -> Result<Option<Category>, BenefitError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.iter().find(|c| &c.id == id).cloned())
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, BenefitError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(categories
            .iter()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Get all categories in stored order
    pub fn get_all(&self) -> Result<Vec<Category>, BenefitError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.clone())
    }

    /// Insert a new category or replace the one with the same ID in place
    pub fn upsert(&self, category: Category) -> Result<(), BenefitError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => categories.push(category),
        }
        Ok(())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, BenefitError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| BenefitError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(categories.len())
    }
}
