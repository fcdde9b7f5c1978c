//! Export option validation
//!
//! Every rule runs independently; all violations are reported together so the
//! caller can show the full list at once.

use super::options::{CategorySelection, ExportFormat, ExportOptions};

pub const FILENAME_REQUIRED: &str = "Filename is required";
pub const FILENAME_INVALID: &str = "Filename contains invalid characters";
pub const DATE_ORDER: &str = "Start date must be before end date";
pub const CATEGORY_REQUIRED: &str = "Please select at least one category or include all categories";

/// Validate export options, returning human-readable errors (empty when valid)
pub fn validate_export_options(options: &ExportOptions) -> Vec<String> {
    let mut errors = Vec::new();

    let filename = options.filename.trim();
    if filename.is_empty() {
        errors.push(FILENAME_REQUIRED.to_string());
    } else if !is_safe_filename(strip_known_extension(filename)) {
        errors.push(FILENAME_INVALID.to_string());
    }

    if let Some((start, end)) = options.date_range.bounds() {
        if start > end {
            errors.push(DATE_ORDER.to_string());
        }
    }

    if let CategorySelection::Only(selected) = &options.categories {
        if selected.is_empty() {
            errors.push(CATEGORY_REQUIRED.to_string());
        }
    }

    errors
}

/// Strip a trailing `.csv`, `.json` or `.pdf`
fn strip_known_extension(filename: &str) -> &str {
    ExportFormat::ALL
        .iter()
        .find_map(|f| {
            filename
                .strip_suffix(f.extension())
                .and_then(|rest| rest.strip_suffix('.'))
        })
        .unwrap_or(filename)
}

/// Non-empty and only letters, digits, `.`, `_` and `-`
fn is_safe_filename(stem: &str) -> bool {
    !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::options::DateRange;
    use crate::models::Category;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn options(filename: &str) -> ExportOptions {
        ExportOptions::new(ExportFormat::Csv, filename)
    }

    #[test]
    fn test_valid_options() {
        assert!(validate_export_options(&options("report_2024-01")).is_empty());
        assert!(validate_export_options(&options("report_2024-01.csv")).is_empty());
        assert!(validate_export_options(&options("expenses-export-2024-01-01.pdf")).is_empty());
    }

    #[test]
    fn test_filename_rules() {
        assert_eq!(validate_export_options(&options("")), vec![FILENAME_REQUIRED]);
        assert_eq!(validate_export_options(&options("   ")), vec![FILENAME_REQUIRED]);
        assert_eq!(validate_export_options(&options("../etc")), vec![FILENAME_INVALID]);
        assert_eq!(validate_export_options(&options("my report")), vec![FILENAME_INVALID]);
        assert_eq!(validate_export_options(&options(".csv")), vec![FILENAME_INVALID]);
        assert_eq!(validate_export_options(&options("a/b.json")), vec![FILENAME_INVALID]);
    }

    #[test]
    fn test_strip_known_extension() {
        assert_eq!(strip_known_extension("a.csv"), "a");
        assert_eq!(strip_known_extension("a.json"), "a");
        assert_eq!(strip_known_extension("a.txt"), "a.txt");
        assert_eq!(strip_known_extension("acsv"), "acsv");
    }

    #[test]
    fn test_reversed_date_range() {
        let opts = options("ok")
            .with_date_range(DateRange::between(date(2024, 3, 1), date(2024, 2, 1)));
        assert_eq!(validate_export_options(&opts), vec![DATE_ORDER]);

        let same_day = options("ok")
            .with_date_range(DateRange::between(date(2024, 3, 1), date(2024, 3, 1)));
        assert!(validate_export_options(&same_day).is_empty());
    }

    #[test]
    fn test_empty_category_selection() {
        let opts = options("ok").with_categories(CategorySelection::Only(vec![]));
        assert_eq!(validate_export_options(&opts), vec![CATEGORY_REQUIRED]);

        let opts = options("ok").with_categories(CategorySelection::Only(vec![Category::Food]));
        assert!(validate_export_options(&opts).is_empty());
    }

    #[test]
    fn test_all_violations_collected_in_order() {
        let opts = options("bad name!")
            .with_date_range(DateRange::between(date(2024, 3, 1), date(2024, 2, 1)))
            .with_categories(CategorySelection::Only(vec![]));

        assert_eq!(
            validate_export_options(&opts),
            vec![FILENAME_INVALID, DATE_ORDER, CATEGORY_REQUIRED]
        );
    }
}
