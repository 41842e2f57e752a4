//! Entry CLI commands
//!
//! Adding an entry computes the reimbursement against the budget remaining
//! at the time of submission. Entries are immutable once added.

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_amount, parse_date};
use crate::config::Settings;
use crate::display::entry::{format_entry_list, format_preview};
use crate::error::BenefitResult;
use crate::models::ExpenseDraft;
use crate::services::{CategoryService, ExpenseService};
use crate::storage::Storage;

/// Entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record an invoice against a category
    Add {
        /// Category name or ID
        category: String,
        /// Invoice amount (e.g. "120", "89,90", "CHF 1'234.50")
        amount: String,
        /// Invoice date (YYYY-MM-DD or the configured format, default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Show what an invoice would be reimbursed without recording it
    Preview {
        /// Category name or ID
        category: String,
        /// Invoice amount
        amount: String,
    },

    /// List recorded entries, newest first
    List {
        /// Only entries of this category
        #[arg(short, long)]
        category: Option<String>,
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EntryCommands,
    today: NaiveDate,
) -> BenefitResult<()> {
    let categories = CategoryService::new(storage);
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        EntryCommands::Add {
            category,
            amount,
            date,
            description,
        } => {
            let cat = categories.require(&category)?;
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d, &settings.date_format)?,
                None => today,
            };

            let draft = ExpenseDraft::new(date, cat.id.clone(), description.unwrap_or_default(), amount);
            let entry = service.submit(draft, today)?;

            println!("Added entry: {}", entry.id.short());
            println!("  Category:   {}", cat.name);
            println!("  Amount:     {}", entry.amount.format_with_symbol(symbol));
            println!("  Reimbursed: {}", entry.reimbursed.format_with_symbol(symbol));
            println!("  Self-pay:   {}", entry.self_pay().format_with_symbol(symbol));
        }

        EntryCommands::Preview { category, amount } => {
            let cat = categories.require(&category)?;
            let draft = ExpenseDraft::new(today, cat.id, "", parse_amount(&amount)?);
            let preview = service.preview(&draft, today)?;
            print!("{}", format_preview(&preview, symbol));
        }

        EntryCommands::List { category, limit } => {
            let filter = category.map(|c| categories.require(&c)).transpose()?;
            let mut entries = service.list(filter.as_ref())?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }

            print!(
                "{}",
                format_entry_list(&entries, &categories.list()?, symbol, &settings.date_format)
            );
        }
    }

    Ok(())
}
