//! Expense display formatting
//!
//! Formats expenses for terminal output in table and detail views.

use std::fmt::Write as _;

use chrono::NaiveDate;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};

use crate::models::{Expense, Money};

/// Descriptions longer than this are cut in list views
const DESCRIPTION_WIDTH: usize = 32;

/// Format a list of expenses as a table with a total row
pub fn format_expense_list(expenses: &[Expense], currency_symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Date", "Description", "Category", "Amount"]);

    for expense in expenses {
        builder.push_record([
            expense.id.to_string(),
            format_date(expense.date, date_format),
            truncate(&expense.description, DESCRIPTION_WIDTH),
            expense.category.to_string(),
            expense.amount.format_with_symbol(currency_symbol),
        ]);
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    builder.push_record([
        String::new(),
        String::new(),
        format!("TOTAL ({})", expenses.len()),
        String::new(),
        total.format_with_symbol(currency_symbol),
    ]);

    let mut table = builder.build();
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    table.to_string()
}

/// Render `date` with a strftime pattern, falling back to `YYYY-MM-DD`
///
/// A pattern chrono cannot apply to a bare date (a hand-edited config with
/// `%H`, say) must not take down every listing.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_ok() {
        out
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("  Full ID:     {}\n", expense.id.as_uuid()));
    output.push_str(&format!("  Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("  Description: {}\n", expense.description));
    output.push_str(&format!("  Category:    {}\n", expense.category));
    output.push_str(&format!(
        "  Amount:      {}\n",
        expense.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Created:     {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "  Updated:     {}\n",
        expense.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Truncate a string to `max` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
