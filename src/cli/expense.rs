//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing and editing expenses.

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_analytics, format_date, format_expense_details, format_expense_list, format_summary,
};
use crate::error::ExpenseResult;
use crate::models::ExpenseEdit;
use crate::services::{calculate_analytics, calculate_summary, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::{parse_amount, parse_category, parse_date};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "42.50" or "42")
        amount: String,
        /// What the money was spent on
        description: String,
        /// Category (food, transportation, entertainment, shopping, bills, other)
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List expenses
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Start of date range (YYYY-MM-DD); needs --to
        #[arg(long)]
        from: Option<String>,
        /// End of date range (YYYY-MM-DD); needs --from
        #[arg(long)]
        to: Option<String>,
        /// Search description, category or amount
        #[arg(short, long)]
        search: Option<String>,
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show expense details
    Show {
        /// Expense ID (full or short form)
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID (full or short form)
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID (full or short form)
        id: String,
    },
    /// Delete every expense
    Clear {
        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },
    /// Show totals, this month's spending and the category breakdown
    Summary,
    /// Show the six-month trend, this month by day and top categories
    Analytics {
        /// Print the figures as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let category = parse_category(&category)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let expense = service.create(amount, &description, category, date)?;

            println!("Recorded expense: {}", expense.description);
            println!("  Amount:   {}", expense.amount.format_with_symbol(symbol));
            println!("  Category: {}", expense.category);
            println!("  Date:     {}", format_date(expense.date, &settings.date_format));
            println!("  ID:       {}", expense.id);
        }

        ExpenseCommands::List {
            category,
            from,
            to,
            search,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();
            if let Some(c) = category {
                filter = filter.category(parse_category(&c)?);
            }
            filter.start_date = from.as_deref().map(parse_date).transpose()?;
            filter.end_date = to.as_deref().map(parse_date).transpose()?;
            filter.search = search;
            filter.limit = limit;

            let expenses = service.list(&filter)?;
            println!(
                "{}",
                format_expense_list(&expenses, symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(&id)?;
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            description,
            category,
            date,
        } => {
            let found = service.find(&id)?;

            let edit = ExpenseEdit {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
                category: category.as_deref().map(parse_category).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
            };

            if edit.is_empty() {
                println!("No changes specified. Use --amount, --description, --category or --date.");
                return Ok(());
            }

            let updated = service.update(found.id, &edit)?;
            println!("Updated expense: {}", updated.id);
            print!("{}", format_expense_details(&updated, symbol));
        }

        ExpenseCommands::Delete { id } => {
            let found = service.find(&id)?;
            let deleted = service.delete(found.id)?;
            println!(
                "Deleted expense: {} ({})",
                deleted.description,
                deleted.amount.format_with_symbol(symbol)
            );
        }

        ExpenseCommands::Clear { force } => {
            if !force {
                println!("This deletes every expense. Re-run with --force to confirm.");
                return Ok(());
            }
            let removed = service.clear()?;
            println!("Deleted {} expenses.", removed);
        }

        ExpenseCommands::Summary => {
            let expenses = service.all()?;
            let summary = calculate_summary(&expenses, Local::now().date_naive());
            println!("{}", format_summary(&summary, symbol));
        }

        ExpenseCommands::Analytics { json } => {
            let expenses = service.all()?;
            let analytics = calculate_analytics(&expenses, Local::now().date_naive());
            if json {
                println!("{}", serde_json::to_string_pretty(&analytics)?);
            } else {
                print!("{}", format_analytics(&analytics, symbol));
            }
        }
    }

    Ok(())
}
