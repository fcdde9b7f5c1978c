//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod expense;
pub mod export;

pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs, ExportCommands};

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Money};
use crate::storage::Storage;

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(value: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!(
            "Invalid date: '{}'. Use the format YYYY-MM-DD",
            value
        ))
    })
}

/// Parse a category argument (case-insensitive)
pub fn parse_category(value: &str) -> ExpenseResult<Category> {
    value
        .parse::<Category>()
        .map_err(|e| ExpenseError::Validation(e.to_string()))
}

/// Parse an amount argument such as "42.50" or "$1,200"
pub fn parse_amount(value: &str) -> ExpenseResult<Money> {
    Money::parse(value).map_err(|e| {
        ExpenseError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '42.50' or '42'. Error: {}",
            value, e
        ))
    })
}

/// Print the most recent audit log entries, oldest first
pub fn handle_history(storage: &Storage, count: usize) -> ExpenseResult<()> {
    let entries = storage.audit().read_recent(count)?;

    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").unwrap_err().is_validation());
        assert!(parse_date("02/01/2024").is_err());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("food").unwrap(), Category::Food);
        assert!(parse_category("rent").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,200.5").unwrap(), Money::from_cents(120050));
        assert!(parse_amount("twelve").is_err());
    }
}
