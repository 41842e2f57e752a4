//! Renewal periods and period keys
//!
//! A category's budget cap resets at each renewal boundary. Rather than
//! archiving entries, every date is mapped to a [`PeriodKey`]; two dates share a
//! key exactly when they fall into the same renewal window.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BenefitError;

/// Cadence at which a category's budget cap resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewalPeriod {
    /// Calendar year
    Yearly,
    /// Calendar-aligned 3-year block starting at a multiple of 3
    #[serde(alias = "3y")]
    Triennial,
    /// Never resets
    #[serde(alias = "all")]
    Unbounded,
}

impl RenewalPeriod {
    /// All renewal periods in display order
    pub fn all() -> &'static [Self] {
        &[Self::Yearly, Self::Triennial, Self::Unbounded]
    }

    /// Parse a renewal period, accepting the legacy spellings "3y" and "all"
    pub fn parse(s: &str) -> Result<Self, BenefitError> {
        match s.trim().to_lowercase().as_str() {
            "yearly" => Ok(Self::Yearly),
            "triennial" | "3y" => Ok(Self::Triennial),
            "unbounded" | "all" => Ok(Self::Unbounded),
            _ => Err(BenefitError::InvalidPeriod(s.to_string())),
        }
    }

    /// Canonical name as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yearly => "yearly",
            Self::Triennial => "triennial",
            Self::Unbounded => "unbounded",
        }
    }

    /// Short suffix for budget displays ("/year", "/3 years")
    pub fn budget_suffix(&self) -> &'static str {
        match self {
            Self::Yearly => "/year",
            Self::Triennial => "/3 years",
            Self::Unbounded => "total",
        }
    }

    /// Resolve the renewal window containing `date`
    pub fn key_for(&self, date: NaiveDate) -> PeriodKey {
        period_key(*self, date)
    }
}

impl FromStr for RenewalPeriod {
    type Err = BenefitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RenewalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical identifier of one renewal window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    Year(i32),
    Block { start: i32, end: i32 },
    All,
}

impl PeriodKey {
    /// Human-readable label for overviews
    pub fn label(&self) -> String {
        match self {
            Self::Year(year) => year.to_string(),
            Self::Block { start, end } => format!("{}–{}", start, end),
            Self::All => "all time".to_string(),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{:04}", year),
            Self::Block { start, end } => write!(f, "{:04}-{:04}", start, end),
            Self::All => f.write_str("all"),
        }
    }
}

/// Map a (renewal period, date) pair to the key of its renewal window
pub fn period_key(period: RenewalPeriod, date: NaiveDate) -> PeriodKey {
    match period {
        RenewalPeriod::Yearly => PeriodKey::Year(date.year()),
        RenewalPeriod::Triennial => {
            let year = date.year();
            let start = year - year.rem_euclid(3);
            PeriodKey::Block {
                start,
                end: start + 2,
            }
        }
        RenewalPeriod::Unbounded => PeriodKey::All,
    }
}
