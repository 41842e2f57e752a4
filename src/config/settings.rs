//! User settings for the benefits tracker
//!
//! Manages user preferences: currency display, the fallback category for
//! scanned invoices, OCR language hints and export naming.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::BenefitPaths;
use crate::error::BenefitError;
use crate::models::CategoryId;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in displays
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Category guessed when no keyword matches a scanned invoice
    #[serde(default = "default_category")]
    pub default_category: CategoryId,

    /// Language hints passed to the OCR engine
    #[serde(default = "default_ocr_languages")]
    pub ocr_languages: Vec<String>,

    /// File name prefix for CSV exports
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "CHF".to_string()
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

fn default_category() -> CategoryId {
    CategoryId::from("alternativmedizin")
}

fn default_ocr_languages() -> Vec<String> {
    vec!["deu".to_string(), "eng".to_string()]
}

fn default_export_prefix() -> String {
    "sanitas-tracker".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_category: default_category(),
            ocr_languages: default_ocr_languages(),
            export_prefix: default_export_prefix(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BenefitPaths) -> Result<Self, BenefitError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BenefitError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BenefitError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject settings that would fail later, when dates are formatted
    pub fn validate(&self) -> Result<(), BenefitError> {
        if self.date_format.trim().is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(BenefitError::Config(format!(
                "Invalid date format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BenefitPaths) -> Result<(), BenefitError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BenefitError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BenefitError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Default file name for a CSV export of the given year
    pub fn export_file_name(&self, year: i32) -> String {
        format!("{}_{}.csv", self.export_prefix, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "CHF");
        assert_eq!(settings.default_category.as_str(), "alternativmedizin");
        assert_eq!(settings.ocr_languages, vec!["deu", "eng"]);
        assert_eq!(settings.export_file_name(2025), "sanitas-tracker_2025.csv");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BenefitPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_category = CategoryId::from("vorsorge");
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_category.as_str(), "vorsorge");
    }

    #[test]
    fn test_invalid_date_format_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BenefitPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"date_format": "%d.%m.%"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BenefitError::Config(_)));
    }

    #[test]
    fn test_empty_date_format_rejected() {
        let settings = Settings {
            date_format: String::new(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(BenefitError::Config(_))));
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.export_prefix, "sanitas-tracker");
    }
}
