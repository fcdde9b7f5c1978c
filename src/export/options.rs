//! Export options
//!
//! `ExportOptions` is the transient configuration for one export: target
//! format, output filename, an optional inclusive date range and a category
//! selection. Its JSON form uses the camelCase schema
//! `{format, filename, dateRange: {startDate, endDate}, selectedCategories, includeAllCategories}`
//! where empty date strings mean "no bound".

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::models::Category;

/// Output encodings supported by the export pipeline
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// Pretty-printed JSON document
    Json,
    /// Single-page PDF report
    Pdf,
}

impl ExportFormat {
    /// All formats in menu order
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Pdf];

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Pdf => "pdf",
        }
    }

    /// Content-type tag attached to delivered artifacts
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
            Self::Pdf => "application/pdf",
        }
    }

    /// Rough serialized size of one record, used by the preview estimate
    pub fn estimated_record_size(&self) -> usize {
        match self {
            Self::Csv => 80,
            Self::Json => 200,
            // layout overhead of the document format
            Self::Pdf => 500,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExpenseError::Export(format!("Unsupported export format: {}", wanted)))
    }
}

/// Inclusive date range; filtering only applies when both bounds are set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range with both bounds
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both bounds, if both are present
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    /// Whether `date` passes the range; always true unless both bounds are set
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.bounds() {
            Some((start, end)) => start <= date && date <= end,
            None => true,
        }
    }
}

/// Which categories an export includes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// No category filtering
    #[default]
    All,
    /// Only these categories; an empty list selects nothing
    Only(Vec<Category>),
}

impl CategorySelection {
    /// Whether a record of this category is selected
    pub fn includes(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected.contains(&category),
        }
    }

    /// The explicitly selected categories (empty for `All`)
    pub fn selected(&self) -> &[Category] {
        match self {
            Self::All => &[],
            Self::Only(selected) => selected,
        }
    }
}

/// Configuration for a single export
///
/// `format` keeps the requested name as given; it is resolved to an
/// [`ExportFormat`] only when the export runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExportOptionsSchema", into = "ExportOptionsSchema")]
pub struct ExportOptions {
    pub format: String,
    pub filename: String,
    pub date_range: DateRange,
    pub categories: CategorySelection,
}

impl ExportOptions {
    /// Options for `format` with the given filename, all dates and all categories
    pub fn new(format: ExportFormat, filename: impl Into<String>) -> Self {
        Self {
            format: format.to_string(),
            filename: filename.into(),
            date_range: DateRange::default(),
            categories: CategorySelection::All,
        }
    }

    /// Restrict to an inclusive date range
    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    /// Restrict to a category selection
    pub fn with_categories(mut self, categories: CategorySelection) -> Self {
        self.categories = categories;
        self
    }

    /// Request a format by name
    pub fn with_format_name(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// The requested format, or `Export("Unsupported export format: ...")`
    pub fn export_format(&self) -> Result<ExportFormat, ExpenseError> {
        self.format.parse()
    }

    /// File extension for the requested format name, lowercased
    pub fn extension(&self) -> String {
        self.format.trim().to_ascii_lowercase()
    }

    /// Filename of the delivered artifact, with the format's extension ensured
    pub fn artifact_filename(&self) -> String {
        let filename = self.filename.trim();
        let suffix = format!(".{}", self.extension());
        if filename.ends_with(&suffix) {
            filename.to_string()
        } else {
            format!("{}{}", filename, suffix)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateRangeSchema {
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportOptionsSchema {
    #[serde(default = "default_format_name")]
    format: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    date_range: DateRangeSchema,
    #[serde(default)]
    selected_categories: Vec<String>,
    #[serde(default = "default_include_all")]
    include_all_categories: bool,
}

fn default_format_name() -> String {
    ExportFormat::default().to_string()
}

fn default_include_all() -> bool {
    true
}

fn parse_optional_date(value: &str, field: &str) -> Result<Option<NaiveDate>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| format!("Invalid {} '{}': {}", field, value, e))
}

impl TryFrom<ExportOptionsSchema> for ExportOptions {
    type Error = String;

    fn try_from(raw: ExportOptionsSchema) -> Result<Self, Self::Error> {
        let date_range = DateRange {
            start: parse_optional_date(&raw.date_range.start_date, "startDate")?,
            end: parse_optional_date(&raw.date_range.end_date, "endDate")?,
        };

        let categories = if raw.include_all_categories {
            CategorySelection::All
        } else {
            let selected = raw
                .selected_categories
                .iter()
                .map(|name| name.parse::<Category>().map_err(|e| e.to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            CategorySelection::Only(selected)
        };

        Ok(Self {
            format: raw.format,
            filename: raw.filename,
            date_range,
            categories,
        })
    }
}

impl From<ExportOptions> for ExportOptionsSchema {
    fn from(options: ExportOptions) -> Self {
        let date_string = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        Self {
            format: options.format,
            filename: options.filename,
            date_range: DateRangeSchema {
                start_date: date_string(options.date_range.start),
                end_date: date_string(options.date_range.end),
            },
            selected_categories: options
                .categories
                .selected()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            include_all_categories: options.categories == CategorySelection::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.content_type(), "application/json");
        assert!(
            ExportFormat::Pdf.estimated_record_size() > ExportFormat::Json.estimated_record_size()
        );
    }

    #[test]
    fn test_unknown_format_is_export_error() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        let err = "xlsx".parse::<ExportFormat>().unwrap_err();
        assert_eq!(err.to_string(), "Export error: Unsupported export format: xlsx");
    }

    #[test]
    fn test_date_range_needs_both_bounds() {
        let half_open = DateRange {
            start: Some(date(2024, 1, 1)),
            end: None,
        };
        assert!(half_open.contains(date(2000, 1, 1)));

        let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_category_selection() {
        assert!(CategorySelection::All.includes(Category::Bills));
        let only = CategorySelection::Only(vec![Category::Food]);
        assert!(only.includes(Category::Food));
        assert!(!only.includes(Category::Bills));
        assert!(!CategorySelection::Only(vec![]).includes(Category::Food));
    }

    #[test]
    fn test_artifact_filename_appends_extension_once() {
        let options = ExportOptions::new(ExportFormat::Csv, "report");
        assert_eq!(options.artifact_filename(), "report.csv");

        let options = ExportOptions::new(ExportFormat::Pdf, "report.pdf");
        assert_eq!(options.artifact_filename(), "report.pdf");
    }

    #[test]
    fn test_schema_deserialization() {
        let json = r#"{
            "format": "json",
            "filename": "q1.json",
            "dateRange": {"startDate": "2024-01-01", "endDate": ""},
            "selectedCategories": ["Food", "bills"],
            "includeAllCategories": false
        }"#;

        let options: ExportOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.export_format().unwrap(), ExportFormat::Json);
        assert_eq!(options.date_range.start, Some(date(2024, 1, 1)));
        assert_eq!(options.date_range.end, None);
        assert_eq!(
            options.categories,
            CategorySelection::Only(vec![Category::Food, Category::Bills])
        );
    }

    #[test]
    fn test_schema_rejects_bad_values() {
        let bad_date = r#"{"dateRange": {"startDate": "2024-13-40"}}"#;
        assert!(serde_json::from_str::<ExportOptions>(bad_date).is_err());

        let bad_category = r#"{"selectedCategories": ["Rent"], "includeAllCategories": false}"#;
        assert!(serde_json::from_str::<ExportOptions>(bad_category).is_err());
    }

    #[test]
    fn test_unknown_format_survives_parsing() {
        let options: ExportOptions =
            serde_json::from_str(r#"{"format": "XLSX", "filename": "sheet"}"#).unwrap();

        assert_eq!(options.format, "XLSX");
        assert_eq!(options.artifact_filename(), "sheet.xlsx");
        let err = options.export_format().unwrap_err();
        assert_eq!(err.to_string(), "Export error: Unsupported export format: XLSX");
    }

    #[test]
    fn test_missing_format_defaults_to_csv() {
        let options: ExportOptions = serde_json::from_str(r#"{"filename": "x"}"#).unwrap();
        assert_eq!(options.export_format().unwrap(), ExportFormat::Csv);
    }

    #[test]
    fn test_schema_serialization() {
        let options = ExportOptions::new(ExportFormat::Pdf, "r.pdf")
            .with_date_range(DateRange::between(date(2024, 3, 1), date(2024, 3, 31)))
            .with_categories(CategorySelection::Only(vec![Category::Shopping]));

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["format"], "pdf");
        assert_eq!(value["dateRange"]["startDate"], "2024-03-01");
        assert_eq!(value["selectedCategories"][0], "Shopping");
        assert_eq!(value["includeAllCategories"], false);

        let back: ExportOptions = serde_json::from_value(value).unwrap();
        assert_eq!(back, options);
    }
}
