//! CLI commands for data export
//!
//! CSV exports the entry history; JSON and YAML export everything. `verify`
//! reads a previous export back and checks it without touching storage.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::error::{BenefitError, BenefitResult};
use crate::export::{csv, json, yaml, FullExport};
use crate::models::Money;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (entries only)
    Csv,
    /// JSON format (everything)
    Json,
    /// YAML format (everything, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export entries to CSV
    Csv {
        /// Output file path, "-" for stdout
        /// (default: <export dir>/<prefix>_<year>.csv)
        output: Option<PathBuf>,
    },

    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Read back an export file and check that it is complete and valid
    Verify {
        /// Export file to check
        input: PathBuf,

        /// File format (default: from the file extension, else JSON)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },
}

impl ExportFormat {
    /// Guess the format of an existing export from its extension
    fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Self::Csv,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
    today: NaiveDate,
) -> BenefitResult<()> {
    match cmd {
        ExportCommands::Csv { output } => handle_export_csv(storage, settings, output, today),
        ExportCommands::All {
            output,
            format,
            pretty,
        } => handle_export_all(storage, output, format, pretty, today),
        ExportCommands::Verify { input, format } => handle_export_verify(settings, input, format),
    }
}

fn create_file(output: &Path) -> BenefitResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        BenefitError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn handle_export_csv(
    storage: &Storage,
    settings: &Settings,
    output: Option<PathBuf>,
    today: NaiveDate,
) -> BenefitResult<()> {
    if output.as_deref().is_some_and(|p| p.as_os_str() == "-") {
        let stdout = std::io::stdout();
        return csv::export_entries_csv(storage, stdout.lock());
    }

    let output = match output {
        Some(path) => path,
        None => {
            let dir = storage.paths().export_dir();
            std::fs::create_dir_all(&dir).map_err(|e| {
                BenefitError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
            dir.join(settings.export_file_name(today.year()))
        }
    };

    let mut writer = create_file(&output)?;
    csv::export_entries_csv(storage, &mut writer)?;
    writer
        .flush()
        .map_err(|e| BenefitError::Export(e.to_string()))?;

    let count = storage.entries.count()?;
    println!("Exported {} entries to: {}", count, output.display());

    Ok(())
}

fn handle_export_all(
    storage: &Storage,
    output: PathBuf,
    format: ExportFormat,
    pretty: bool,
    today: NaiveDate,
) -> BenefitResult<()> {
    let mut writer = create_file(&output)?;

    match format {
        ExportFormat::Csv => {
            csv::export_entries_csv(storage, &mut writer)?;
            println!("Entries exported to: {}", output.display());
            println!("Note: CSV format exports entries only. Use JSON or YAML for a full export.");
        }
        ExportFormat::Json => {
            json::export_full_json(storage, &mut writer, pretty, today)?;
            println!("Full export written to: {}", output.display());
        }
        ExportFormat::Yaml => {
            yaml::export_full_yaml(storage, &mut writer, today)?;
            println!("Full export written to: {}", output.display());
        }
    }

    writer
        .flush()
        .map_err(|e| BenefitError::Export(e.to_string()))?;

    Ok(())
}

fn handle_export_verify(
    settings: &Settings,
    input: PathBuf,
    format: Option<ExportFormat>,
) -> BenefitResult<()> {
    if !input.exists() {
        return Err(BenefitError::Import(format!(
            "File not found: {}",
            input.display()
        )));
    }

    let contents = std::fs::read_to_string(&input)
        .map_err(|e| BenefitError::Import(format!("Failed to read file: {}", e)))?;

    let format = format.unwrap_or_else(|| ExportFormat::from_path(&input));
    let symbol = &settings.currency_symbol;

    match format {
        ExportFormat::Csv => {
            let rows = csv::read_entries_csv(contents.as_bytes())?;
            let amount: Money = rows.iter().map(|r| r.amount).sum();
            let reimbursed: Money = rows.iter().map(|r| r.reimbursed).sum();
            println!("Valid CSV export: {}", input.display());
            println!("  Entries:    {}", rows.len());
            println!("  Invoiced:   {}", amount.format_with_symbol(symbol));
            println!("  Reimbursed: {}", reimbursed.format_with_symbol(symbol));
        }
        ExportFormat::Json => print_full_export(settings, &input, &json::import_from_json(&contents)?),
        ExportFormat::Yaml => print_full_export(settings, &input, &yaml::import_from_yaml(&contents)?),
    }

    Ok(())
}

fn print_full_export(settings: &Settings, input: &Path, export: &FullExport) {
    println!("Valid full export: {}", input.display());
    println!("  Schema:     {}", export.schema_version);
    println!(
        "  Exported:   {} (as of {})",
        export.exported_at.format("%Y-%m-%d %H:%M UTC"),
        export.metadata.as_of.format(&settings.date_format)
    );
    println!("  Categories: {}", export.categories.len());
    println!("  Entries:    {}", export.entries.len());
    println!(
        "  Reimbursed: {}",
        export
            .metadata
            .total_reimbursed
            .format_with_symbol(&settings.currency_symbol)
    );
}
