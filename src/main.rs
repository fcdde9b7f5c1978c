use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_config_command, handle_expense_command, handle_export_command, handle_history,
    ConfigCommands, ExpenseCommands, ExportCommands,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track personal expenses and export them as CSV, JSON or PDF",
    long_about = "expenses records your spending in a local JSON store, summarises it \
                  by month and category, and exports filtered selections as CSV, \
                  JSON or a one-page PDF report."
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Preview, validate and run exports
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    initialize_logging(cli.verbose, &settings);

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_lenient()?;
    debug!(base_dir = %paths.base_dir().display(), "storage ready");

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::History { count }) => {
            handle_history(&storage, count)?;
        }
        Some(Commands::Config { command }) => {
            handle_config_command(&paths, &settings, command)?;
        }
        None => {
            println!("expenses - track spending and export it");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses add 12.50 \"Lunch\" -c food' to record an expense.");
        }
    }

    Ok(())
}

/// Initialize logging: -v/-vv win, then RUST_LOG, then the configured level
fn initialize_logging(verbose: u8, settings: &Settings) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&settings.log_level))
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
