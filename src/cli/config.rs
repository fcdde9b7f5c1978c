//! Configuration CLI commands

use clap::Subcommand;

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,
    /// Change a setting and save it
    Set {
        /// Setting name (e.g. default_export_format)
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command; no subcommand means `show`
pub fn handle_config_command(
    paths: &ExpensePaths,
    settings: &Settings,
    cmd: Option<ConfigCommands>,
) -> ExpenseResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            print!("{}", format_config(paths, settings));
        }
        ConfigCommands::Set { key, value } => {
            let mut updated = settings.clone();
            updated.set(&key, &value)?;
            updated.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}

fn format_config(paths: &ExpensePaths, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str("Expense Tracker Configuration\n");
    output.push_str("=============================\n");
    output.push_str(&format!("Base directory:   {}\n", paths.base_dir().display()));
    output.push_str(&format!("Expenses file:    {}\n", paths.expenses_file().display()));
    output.push_str(&format!("Settings file:    {}\n", paths.settings_file().display()));
    output.push_str(&format!("Audit log:        {}\n", paths.audit_log().display()));
    output.push_str(&format!(
        "Export directory: {}\n",
        settings.resolve_export_dir(paths).display()
    ));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!("  currency_symbol:       {}\n", settings.currency_symbol));
    output.push_str(&format!("  date_format:           {}\n", settings.date_format));
    output.push_str(&format!(
        "  default_export_format: {}\n",
        settings.default_export_format
    ));
    output.push_str(&format!("  show_progress:         {}\n", settings.show_progress));
    output.push_str(&format!(
        "  progress_interval_ms:  {}\n",
        settings.progress_interval_ms
    ));
    output.push_str(&format!("  log_level:             {}\n", settings.log_level));

    output
}
