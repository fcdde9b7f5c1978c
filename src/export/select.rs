//! Record selection for exports
//!
//! Narrows a record set by the options' date range and category selection.
//! Output keeps input order.

use tracing::debug;

use crate::models::Expense;

use super::options::ExportOptions;

/// Whether a single record passes the export filters
pub fn is_selected(expense: &Expense, options: &ExportOptions) -> bool {
    options.date_range.contains(expense.date) && options.categories.includes(expense.category)
}

/// The subset of `records` the export will contain
pub fn select_records(records: &[Expense], options: &ExportOptions) -> Vec<Expense> {
    let selected: Vec<Expense> = records
        .iter()
        .filter(|e| is_selected(e, options))
        .cloned()
        .collect();

    debug!(
        input = records.len(),
        selected = selected.len(),
        "selected records for export"
    );

    selected
}
