//! Category service
//!
//! Provides lookup and editing of benefit categories. Only the budget cap,
//! coverage and renewal period are editable; IDs are fixed once seeded.

use tracing::info;

use crate::error::{BenefitError, BenefitResult};
use crate::models::{Category, CategoryId, Money, RenewalPeriod};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// List all categories in stored order
    pub fn list(&self) -> BenefitResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Get a category by ID
    pub fn get(&self, id: &CategoryId) -> BenefitResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by ID or name (case-insensitive)
    pub fn find(&self, identifier: &str) -> BenefitResult<Option<Category>> {
        let identifier = identifier.trim();

        if let Some(category) = self.storage.categories.get(&CategoryId::from(identifier))? {
            return Ok(Some(category));
        }

        self.storage.categories.get_by_name(identifier)
    }

    /// Find a category or fail with "not found"
    pub fn require(&self, identifier: &str) -> BenefitResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| BenefitError::category_not_found(identifier))
    }

    /// Set the budget cap
    pub fn update_budget(&self, id: &CategoryId, budget: Money) -> BenefitResult<Category> {
        if budget.is_negative() {
            return Err(BenefitError::InvalidAmount(format!(
                "budget cannot be negative ({})",
                budget.to_decimal_string()
            )));
        }

        self.update(id, |category| {
            info!(category = %category.id, from = %category.budget, to = %budget, "budget changed");
            category.budget = budget;
        })
    }

    /// Set the coverage from a whole percentage, clamped to 0-100
    pub fn update_coverage_percent(&self, id: &CategoryId, percent: f64) -> BenefitResult<Category> {
        let coverage = percent.clamp(0.0, 100.0) / 100.0;

        self.update(id, |category| {
            info!(category = %category.id, from = category.coverage, to = coverage, "coverage changed");
            category.coverage = coverage;
        })
    }

    /// Change the renewal period
    ///
    /// A category switched to triennial immediately joins the calendar-aligned
    /// block containing today.
    pub fn update_period(&self, id: &CategoryId, period: RenewalPeriod) -> BenefitResult<Category> {
        self.update(id, |category| {
            info!(category = %category.id, from = %category.period, to = %period, "period changed");
            category.period = period;
        })
    }

    fn update(&self, id: &CategoryId, edit: impl FnOnce(&mut Category)) -> BenefitResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| BenefitError::category_not_found(id.to_string()))?;

        edit(&mut category);

        category
            .validate()
            .map_err(|e| BenefitError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BenefitPaths;
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

    #[test]
    fn test_find_by_id_or_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        assert_eq!(service.find("vorsorge").unwrap().unwrap().name, "Vorsorge / Check-ups");
        assert_eq!(
            service.find("sehhilfen").unwrap().unwrap().id.as_str(),
            "sehhilfen"
        );
        assert_eq!(
            service.find("haushalthilfe nach spital").unwrap().unwrap().id.as_str(),
            "haushalthilfe"
        );
        assert!(service.find("zahnarzt").unwrap().is_none());
        assert!(service.require("zahnarzt").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_budget_persists() {
        let (temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let id = CategoryId::from("vorsorge");

        service.update_budget(&id, Money::from_units(1200)).unwrap();

        let paths = BenefitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        let category = reloaded.categories.get(&id).unwrap().unwrap();
        assert_eq!(category.budget, Money::from_units(1200));
    }

    #[test]
    fn test_negative_budget_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let err = service
            .update_budget(&CategoryId::from("vorsorge"), Money::from_cents(-100))
            .unwrap_err();
        assert!(matches!(err, BenefitError::InvalidAmount(_)));
    }

    #[test]
    fn test_coverage_percent_is_clamped() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let id = CategoryId::from("vorsorge");

        assert_eq!(service.update_coverage_percent(&id, 150.0).unwrap().coverage, 1.0);
        assert_eq!(service.update_coverage_percent(&id, -5.0).unwrap().coverage, 0.0);
        assert_eq!(
            service.update_coverage_percent(&id, 60.0).unwrap().coverage_percent(),
            60
        );
    }

    #[test]
    fn test_update_period() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let updated = service
            .update_period(&CategoryId::from("vorsorge"), RenewalPeriod::Triennial)
            .unwrap();
        assert_eq!(updated.period, RenewalPeriod::Triennial);
    }

    #[test]
    fn test_update_unknown_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let err = service
            .update_budget(&CategoryId::from("nope"), Money::from_units(1))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
