//! Display formatting for terminal output
//!
//! Formatting functions return `String`s; the CLI decides where to print them.

pub mod category;
pub mod entry;

pub use category::{format_budget_card, format_category_details, format_category_list, format_overview, progress_bar};
pub use entry::{format_entry_list, format_entry_row, format_preview};
