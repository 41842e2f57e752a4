//! Storage initialization
//!
//! Handles first-run setup and seeding of the default benefit categories

use tracing::info;

use crate::config::paths::BenefitPaths;
use crate::error::BenefitError;
use crate::models::default_categories;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Seeds the default categories unless a categories file already exists.
pub fn initialize_storage(paths: &BenefitPaths) -> Result<(), BenefitError> {
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        let data = CategoryData {
            categories: default_categories(),
        };
        write_json_atomic(paths.categories_file(), &data)?;
        info!(count = data.categories.len(), "seeded default categories");
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BenefitPaths) -> bool {
    !paths.categories_file().exists()
}
