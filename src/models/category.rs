//! Benefit categories
//!
//! A category is one reimbursable benefit of the insurance policy: the share of
//! each invoice the insurer pays (coverage) and the most it pays per renewal
//! period (budget cap).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;
use super::period::RenewalPeriod;

/// A reimbursable benefit category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier, never changes after creation
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Optional glyph shown next to the name
    #[serde(default)]
    pub icon: String,

    /// Fraction of an invoice the insurer reimburses (0.0 - 1.0)
    pub coverage: f64,

    /// Maximum cumulative reimbursement per renewal period
    pub budget: Money,

    /// How often the budget resets
    pub period: RenewalPeriod,

    /// Where in the policy documents this benefit is described
    #[serde(default)]
    pub reference: String,
}

impl Category {
    /// Create a new category
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        coverage: f64,
        budget: Money,
        period: RenewalPeriod,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            coverage,
            budget,
            period,
            reference: String::new(),
        }
    }

    /// Set the display icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the policy reference note
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Coverage as a whole percentage
    pub fn coverage_percent(&self) -> u32 {
        (self.coverage * 100.0).round() as u32
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(CategoryValidationError::EmptyId);
        }

        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if !(0.0..=1.0).contains(&self.coverage) {
            return Err(CategoryValidationError::CoverageOutOfRange(self.coverage));
        }

        if self.budget.is_negative() {
            return Err(CategoryValidationError::NegativeBudget);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Categories seeded on first run
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            "alternativmedizin",
            "Alternativmedizin",
            0.8,
            Money::from_units(2500),
            RenewalPeriod::Yearly,
        )
        .with_icon("🧘")
        .with_reference("Beilagen S.8 (80% bis CHF 2'500)"),
        Category::new(
            "gesundheitsfoerderung",
            "Gesundheitsförderung",
            0.5,
            Money::from_units(400),
            RenewalPeriod::Yearly,
        )
        .with_icon("🏋️")
        .with_reference("Beilagen S.8 (50% bis CHF 400)"),
        Category::new(
            "sehhilfen",
            "Sehhilfen",
            1.0,
            Money::from_units(300),
            RenewalPeriod::Triennial,
        )
        .with_icon("👓")
        .with_reference("Beilagen S.8 (100% bis CHF 300 / 3J)"),
        Category::new(
            "vorsorge",
            "Vorsorge / Check-ups",
            0.8,
            Money::from_units(1000),
            RenewalPeriod::Yearly,
        )
        .with_icon("🩺")
        .with_reference("Beilagen S.8 (80% bis CHF 1'000)"),
        Category::new(
            "haushalthilfe",
            "Haushalthilfe nach Spital",
            1.0,
            Money::from_units(750),
            RenewalPeriod::Yearly,
        )
        .with_icon("🧹")
        .with_reference("Beilagen S.9 (CHF 25/h, max. 750)"),
    ]
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryValidationError {
    EmptyId,
    EmptyName,
    CoverageOutOfRange(f64),
    NegativeBudget,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Category ID cannot be empty"),
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::CoverageOutOfRange(c) => {
                write!(f, "Coverage must be between 0.0 and 1.0 (got {})", c)
            }
            Self::NegativeBudget => write!(f, "Budget cannot be negative"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
