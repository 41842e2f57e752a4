//! Category display formatting
//!
//! Budget cards for the overview, plus list and detail views.

use crate::models::Category;
use crate::services::ledger::{CategoryBalance, LedgerSnapshot};

const BAR_WIDTH: usize = 20;

/// Render a progress bar for a percentage in [0, 100]
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// "CHF 2'500.00/year", "CHF 500.00 total"
fn budget_with_suffix(category: &Category, symbol: &str) -> String {
    let suffix = category.period.budget_suffix();
    let separator = if suffix.starts_with('/') { "" } else { " " };
    format!("{}{}{}", category.budget.format_with_symbol(symbol), separator, suffix)
}

/// "80% bis CHF 2'500.00/year"
fn coverage_line(category: &Category, symbol: &str) -> String {
    format!(
        "{}% bis {}",
        category.coverage_percent(),
        budget_with_suffix(category, symbol)
    )
}

fn heading(category: &Category) -> String {
    if category.icon.is_empty() {
        category.name.clone()
    } else {
        format!("{} {}", category.icon, category.name)
    }
}

/// Format one overview card
pub fn format_budget_card(category: &Category, balance: &CategoryBalance, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}  ({})\n", heading(category), category.id));
    output.push_str(&format!("  {}\n", coverage_line(category, symbol)));
    output.push_str(&format!(
        "  {} {:>3.0}%  period {}\n",
        progress_bar(balance.progress_percent, BAR_WIDTH),
        balance.progress_percent,
        balance.period_key.label()
    ));
    output.push_str(&format!(
        "  Remaining: {}   Reimbursed: {}\n",
        balance.remaining.format_with_symbol(symbol),
        balance.total.format_with_symbol(symbol)
    ));

    output
}

/// Format the overview: one card per category in stored order
pub fn format_overview(categories: &[Category], snapshot: &LedgerSnapshot, symbol: &str) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'benefits init' to create the default categories."
            .to_string();
    }

    let mut output = String::new();

    for category in categories {
        if let Some(balance) = snapshot.get(&category.id) {
            output.push_str(&format_budget_card(category, balance, symbol));
            output.push('\n');
        }
    }

    output.push_str(&format!(
        "Total remaining: {}   Total reimbursed: {}\n",
        snapshot.total_remaining().format_with_symbol(symbol),
        snapshot.total_reimbursed().format_with_symbol(symbol)
    ));

    output
}

/// Format a compact table of categories
pub fn format_category_list(categories: &[Category], symbol: &str) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let id_width = categories
        .iter()
        .map(|c| c.id.as_str().len())
        .max()
        .unwrap_or(2)
        .max(2);
    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_w$}  {:<name_w$}  {:>8}  {:>16}  {}\n",
        "ID",
        "Name",
        "Coverage",
        "Budget",
        "Period",
        id_w = id_width,
        name_w = name_width
    ));
    output.push_str(&format!(
        "{:-<id_w$}  {:-<name_w$}  {:->8}  {:->16}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        id_w = id_width,
        name_w = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<id_w$}  {:<name_w$}  {:>7}%  {:>16}  {}\n",
            category.id.as_str(),
            category.name,
            category.coverage_percent(),
            category.budget.format_with_symbol(symbol),
            category.period,
            id_w = id_width,
            name_w = name_width
        ));
    }

    output
}

/// Format category details with its current balance
pub fn format_category_details(
    category: &Category,
    balance: Option<&CategoryBalance>,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", heading(category)));
    output.push_str(&format!("  ID:        {}\n", category.id));
    output.push_str(&format!("  Coverage:  {}%\n", category.coverage_percent()));
    output.push_str(&format!("  Budget:    {}\n", budget_with_suffix(category, symbol)));
    output.push_str(&format!("  Period:    {}\n", category.period));

    if let Some(balance) = balance {
        output.push_str(&format!("  Window:    {}\n", balance.period_key.label()));
        output.push_str(&format!(
            "  Used:      {} ({:.0}%)\n",
            balance.total.format_with_symbol(symbol),
            balance.progress_percent
        ));
        output.push_str(&format!(
            "  Remaining: {}\n",
            balance.remaining.format_with_symbol(symbol)
        ));
    }

    if !category.reference.is_empty() {
        output.push_str(&format!("  Reference: {}\n", category.reference));
    }

    output
}
