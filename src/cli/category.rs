//! Category CLI commands
//!
//! Lists and edits the benefit categories. Categories are seeded by `init`;
//! only budget, coverage and renewal period can be changed.

use chrono::NaiveDate;
use clap::Subcommand;

use super::parse_amount;
use crate::config::Settings;
use crate::display::category::{format_category_details, format_category_list};
use crate::error::BenefitResult;
use crate::models::RenewalPeriod;
use crate::services::{CategoryService, ExpenseService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Show category details and its current balance
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New budget cap (e.g. "1000" or "1'000.00")
        #[arg(short, long)]
        budget: Option<String>,
        /// New coverage in percent (clamped to 0-100)
        #[arg(short, long)]
        coverage: Option<f64>,
        /// New renewal period (yearly, triennial, unbounded)
        #[arg(short, long)]
        period: Option<RenewalPeriod>,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
    today: NaiveDate,
) -> BenefitResult<()> {
    let service = CategoryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories, symbol));
        }

        CategoryCommands::Show { category } => {
            let cat = service.require(&category)?;
            let snapshot = ExpenseService::new(storage).snapshot(today)?;
            print!(
                "{}",
                format_category_details(&cat, snapshot.get(&cat.id), symbol)
            );
        }

        CategoryCommands::Edit {
            category,
            budget,
            coverage,
            period,
        } => {
            let cat = service.require(&category)?;

            if budget.is_none() && coverage.is_none() && period.is_none() {
                println!("No changes specified. Use --budget, --coverage, or --period.");
                return Ok(());
            }

            let mut updated = cat;
            if let Some(budget) = budget {
                updated = service.update_budget(&updated.id, parse_amount(&budget)?)?;
            }
            if let Some(percent) = coverage {
                updated = service.update_coverage_percent(&updated.id, percent)?;
            }
            if let Some(period) = period {
                updated = service.update_period(&updated.id, period)?;
            }

            println!("Updated category: {}", updated.name);
            println!(
                "  {}% up to {} ({})",
                updated.coverage_percent(),
                updated.budget.format_with_symbol(symbol),
                updated.period
            );
        }
    }

    Ok(())
}
