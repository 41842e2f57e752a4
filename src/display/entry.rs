//! Entry display formatting
//!
//! History listing and the reimbursement preview shown before submitting.

use std::collections::HashMap;

use crate::models::{Category, CategoryId, ExpenseEntry};
use crate::services::expense::ReimbursementPreview;

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Format a single history row
pub fn format_entry_row(
    entry: &ExpenseEntry,
    category_name: &str,
    symbol: &str,
    date_format: &str,
) -> String {
    let description = if entry.description.is_empty() {
        "(no description)"
    } else {
        entry.description.as_str()
    };

    format!(
        "{:12} {} {} {:>14} {:>14}  {}",
        entry.id.short(),
        entry.date.format(date_format),
        truncate(category_name, 22),
        entry.amount.format_with_symbol(symbol),
        entry.reimbursed.format_with_symbol(symbol),
        description
    )
}

/// Format the history, newest first, resolving category names
pub fn format_entry_list(
    entries: &[ExpenseEntry],
    categories: &[Category],
    symbol: &str,
    date_format: &str,
) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let names: HashMap<&CategoryId, &str> = categories
        .iter()
        .map(|c| (&c.id, c.name.as_str()))
        .collect();

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:22} {:>14} {:>14}  {}\n",
        "ID", "Date", "Category", "Amount", "Reimbursed", "Description"
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    for entry in entries {
        let name = names
            .get(&entry.category_id)
            .copied()
            .unwrap_or_else(|| entry.category_id.as_str());
        output.push_str(&format_entry_row(entry, name, symbol, date_format));
        output.push('\n');
    }

    output
}

/// Format the reimbursement preview for a draft
pub fn format_preview(preview: &ReimbursementPreview, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category:       {}\n", preview.category.name));
    output.push_str(&format!(
        "Invoice:        {}\n",
        preview.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Coverage:       {}%\n",
        preview.category.coverage_percent()
    ));
    output.push_str(&format!(
        "Remaining:      {}\n",
        preview.remaining_before.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Reimbursed:     {}\n",
        preview.reimbursement.reimbursed.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Self-pay:       {}\n",
        preview.reimbursement.self_pay.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Remaining after: {}\n",
        preview.remaining_after().format_with_symbol(symbol)
    ));

    output
}
