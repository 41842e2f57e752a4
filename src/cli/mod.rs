//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod entry;
pub mod export;
pub mod scan;

pub use category::{handle_category_command, CategoryCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, ExportCommands, ExportFormat};
pub use scan::{handle_scan_command, ScanArgs};

use chrono::NaiveDate;

use crate::error::{BenefitError, BenefitResult};
use crate::models::Money;

/// Parse a date given as `YYYY-MM-DD` or in the configured display format
pub fn parse_date(input: &str, date_format: &str) -> BenefitResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, date_format))
        .map_err(|_| {
            BenefitError::Validation(format!(
                "Invalid date '{}': use YYYY-MM-DD or {}",
                input, date_format
            ))
        })
}

/// Parse a user-entered amount such as "120", "89,90" or "CHF 1'234.50"
pub fn parse_amount(input: &str) -> BenefitResult<Money> {
    Money::parse(input).map_err(|e| BenefitError::InvalidAmount(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_date("2025-03-14", "%d.%m.%Y").unwrap(), expected);
        assert_eq!(parse_date("14.03.2025", "%d.%m.%Y").unwrap(), expected);
        assert!(parse_date("14/03/2025", "%d.%m.%Y").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("CHF 1'234.50").unwrap(), Money::from_cents(123450));
        assert_eq!(parse_amount("89,90").unwrap(), Money::from_cents(8990));
        assert!(matches!(parse_amount("zwölf"), Err(BenefitError::InvalidAmount(_))));
    }
}
