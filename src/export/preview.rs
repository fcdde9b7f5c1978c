//! Export preview
//!
//! Summarises what an export would contain without serializing anything:
//! record count, a date-range label, the selected categories and a size
//! estimate derived from a fixed per-record size for the target format.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Expense;

use super::options::{DateRange, ExportFormat, ExportOptions};
use super::select::select_records;

/// Label used when the export is not restricted by date
pub const ALL_DATES_LABEL: &str = "All dates";

const KILOBYTE: usize = 1024;
const MEGABYTE: usize = 1024 * 1024;

/// Derived, read-only summary of a pending export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPreview {
    pub total_records: usize,
    pub date_range: String,
    pub categories: Vec<String>,
    pub estimated_file_size: String,
    pub filename: String,
}

/// Build the preview for `records` under `options`
///
/// `today` only feeds the default filename used when none was given.
pub fn generate_preview(records: &[Expense], options: &ExportOptions, today: NaiveDate) -> ExportPreview {
    let selected = select_records(records, options);

    let filename = if options.filename.trim().is_empty() {
        default_filename(&options.extension(), today)
    } else {
        options.artifact_filename()
    };
    // unknown format names are sized like the document format
    let size_format = options.export_format().unwrap_or(ExportFormat::Pdf);

    ExportPreview {
        total_records: selected.len(),
        date_range: date_range_label(&options.date_range),
        categories: options
            .categories
            .selected()
            .iter()
            .map(|c| c.name().to_string())
            .collect(),
        estimated_file_size: estimate_file_size(selected.len(), size_format),
        filename,
    }
}

/// `expenses-export-YYYY-MM-DD.<ext>`
pub fn default_filename(extension: &str, today: NaiveDate) -> String {
    format!("expenses-export-{}.{}", today.format("%Y-%m-%d"), extension)
}

/// "Jan 1, 2024 - Mar 31, 2024", or [`ALL_DATES_LABEL`] unless both bounds are set
pub fn date_range_label(range: &DateRange) -> String {
    match range.bounds() {
        Some((start, end)) => format!(
            "{} - {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        ),
        None => ALL_DATES_LABEL.to_string(),
    }
}

/// Human-readable size estimate for `record_count` records in `format`
pub fn estimate_file_size(record_count: usize, format: ExportFormat) -> String {
    format_file_size(record_count * format.estimated_record_size())
}

/// Whole bytes below 1 KB, otherwise KB or MB with one decimal place
pub fn format_file_size(bytes: usize) -> String {
    if bytes < KILOBYTE {
        format!("{} B", bytes)
    } else if bytes < MEGABYTE {
        format!("{:.1} KB", bytes as f64 / KILOBYTE as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MEGABYTE as f64)
    }
}
