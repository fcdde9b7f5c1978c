//! CSV Export functionality
//!
//! One header row, then one row per expense. The description is always quoted;
//! other fields are quoted only when they contain a delimiter, quote or newline.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

use super::iso_timestamp;

/// Column names, in output order
pub const CSV_HEADER: [&str; 6] = [
    "Date",
    "Description",
    "Category",
    "Amount",
    "Created At",
    "Updated At",
];

/// Write expenses as CSV
pub fn write_csv<W: Write>(writer: &mut W, records: &[Expense]) -> ExpenseResult<()> {
    writeln!(writer, "{}", CSV_HEADER.join(","))
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    for expense in records {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            expense.date.format("%Y-%m-%d"),
            quote_csv(&expense.description),
            escape_csv(expense.category.name()),
            expense.amount.to_plain_decimal(),
            iso_timestamp(&expense.created_at),
            iso_timestamp(&expense.updated_at)
        )
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Render expenses as a CSV string
pub fn export_csv(records: &[Expense]) -> ExpenseResult<String> {
    let mut output = Vec::new();
    write_csv(&mut output, records)?;
    String::from_utf8(output).map_err(|e| ExpenseError::Export(e.to_string()))
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        quote_csv(s)
    } else {
        s.to_string()
    }
}

/// Wrap in quotes, doubling any embedded quotes
fn quote_csv(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
