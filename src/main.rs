use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use benefits::cli::{
    handle_category_command, handle_entry_command, handle_export_command, handle_scan_command,
    parse_date, CategoryCommands, EntryCommands, ExportCommands, ScanArgs,
};
use benefits::config::{paths::BenefitPaths, settings::Settings};
use benefits::display::category::format_overview;
use benefits::logging::init_tracing;
use benefits::services::ExpenseService;
use benefits::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "benefits",
    version,
    about = "Track supplementary health insurance benefits",
    long_about = "Tracks invoices against the benefit categories of a supplementary \
                  health insurance plan. Each category reimburses a share of every \
                  invoice up to a budget cap that renews yearly, every three years, \
                  or never."
)]
struct Cli {
    /// Evaluate budgets as of this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true)]
    as_of: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show budget cards for every category
    Overview,

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Expense entry commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Scan an invoice and propose an entry
    Scan(ScanArgs),

    /// Export commands
    #[command(subcommand)]
    Export(ExportCommands),

    /// Initialize the data directory with the default categories
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BenefitPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let today: NaiveDate = match &cli.as_of {
        Some(date) => parse_date(date, &settings.date_format)?,
        None => Local::now().date_naive(),
    };

    // First run seeds the default categories
    initialize_storage(&paths)?;
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Overview) => {
            let categories = storage.categories.get_all()?;
            let snapshot = ExpenseService::new(&storage).snapshot(today)?;
            println!("Benefits as of {}", today.format(&settings.date_format));
            println!();
            print!(
                "{}",
                format_overview(&categories, &snapshot, &settings.currency_symbol)
            );
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, cmd, today)?;
        }
        Some(Commands::Entry(cmd)) => {
            handle_entry_command(&storage, &settings, cmd, today)?;
        }
        Some(Commands::Scan(args)) => {
            handle_scan_command(&storage, &settings, args, today)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd, today)?;
        }
        Some(Commands::Init) => {
            println!("Initializing benefits tracker at: {}", paths.data_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Benefit categories:");
            for category in storage.categories.get_all()? {
                println!("  - {} ({})", category.name, category.id);
            }
            println!();
            println!("Run 'benefits overview' to see your remaining budgets.");
        }
        Some(Commands::Config) => {
            println!("Benefits Tracker Configuration");
            println!("==============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency:         {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Default category: {}", settings.default_category);
            println!("  OCR languages:    {}", settings.ocr_languages.join("+"));
            println!("  Export prefix:    {}", settings.export_prefix);
        }
        None => {
            println!("Benefits Tracker - supplementary insurance budgets");
            println!();
            println!("Run 'benefits --help' for usage information.");
            println!("Run 'benefits overview' to see your remaining budgets.");
        }
    }

    Ok(())
}
