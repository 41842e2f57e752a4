//! Scan CLI command
//!
//! Recognizes an invoice image, proposes a draft entry and optionally
//! commits it. A failed scan never blocks anything: the user is pointed at
//! `entry add` instead.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use tracing::warn;

use super::parse_date;
use crate::config::Settings;
use crate::display::entry::format_preview;
use crate::error::{BenefitError, BenefitResult};
use crate::ocr::{scan_invoice, PlainTextRecognizer, TesseractRecognizer, TextRecognizer};
use crate::services::{CategoryService, ExpenseService, Interpreter};
use crate::storage::Storage;

/// Arguments of `benefits scan`
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Invoice image (or a text file with --text)
    pub file: PathBuf,

    /// Treat the file as already recognized text instead of running OCR
    #[arg(long)]
    pub text: bool,

    /// Record the proposed entry instead of only showing it
    #[arg(long)]
    pub commit: bool,

    /// Override the guessed category (name or ID)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Invoice date (default: today)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Handle the scan command
pub fn handle_scan_command(
    storage: &Storage,
    settings: &Settings,
    args: ScanArgs,
    today: NaiveDate,
) -> BenefitResult<()> {
    let image = std::fs::read(&args.file).map_err(|e| {
        BenefitError::Io(format!("Failed to read {}: {}", args.file.display(), e))
    })?;

    let recognizer: Box<dyn TextRecognizer> = if args.text {
        Box::new(PlainTextRecognizer)
    } else {
        Box::new(TesseractRecognizer::default())
    };

    let categories = CategoryService::new(storage);
    let interpreter = Interpreter::new(settings.default_category.clone());
    let outcome = scan_invoice(
        recognizer.as_ref(),
        &image,
        &settings.ocr_languages,
        &interpreter,
    );

    if let Some(reason) = &outcome.failure {
        println!("Scan failed, please enter the expense manually ({}).", reason);
        println!("  benefits entry add <CATEGORY> <AMOUNT>");
        return Ok(());
    }

    let date = match args.date {
        Some(d) => parse_date(&d, &settings.date_format)?,
        None => today,
    };

    let mut draft = outcome.guess.into_draft(date);

    if let Some(identifier) = args.category {
        draft.category_id = categories.require(&identifier)?.id;
    } else if categories.get(&draft.category_id)?.is_none() {
        warn!(category = %draft.category_id, "guessed category does not exist, using default");
        draft.category_id = settings.default_category.clone();
    }

    let service = ExpenseService::new(storage);
    let preview = service.preview(&draft, today)?;

    println!("Recognized invoice {}", args.file.display());
    print!("{}", format_preview(&preview, &settings.currency_symbol));

    if draft.amount.is_zero() {
        println!("No amount found on the invoice; enter it with 'benefits entry add'.");
        return Ok(());
    }

    if args.commit {
        let entry = service.submit(draft, today)?;
        println!("Added entry: {}", entry.id.short());
    } else {
        println!("Not recorded. Re-run with --commit to add this entry.");
    }

    Ok(())
}
