//! Export display formatting

use crate::export::ExportPreview;

/// Format an export preview as a labelled block
pub fn format_preview(preview: &ExportPreview) -> String {
    let categories = if preview.categories.is_empty() {
        "All categories".to_string()
    } else {
        preview.categories.join(", ")
    };

    let mut output = String::new();
    output.push_str("Export Preview\n");
    output.push_str(&format!("  Records:        {}\n", preview.total_records));
    output.push_str(&format!("  Date range:     {}\n", preview.date_range));
    output.push_str(&format!("  Categories:     {}\n", categories));
    output.push_str(&format!("  Estimated size: {}\n", preview.estimated_file_size));
    output.push_str(&format!("  Filename:       {}\n", preview.filename));
    output
}

/// Format validation messages as a bulleted list
pub fn format_validation_errors(errors: &[String]) -> String {
    let mut output = String::from("Export options are invalid:\n");
    for error in errors {
        output.push_str(&format!("  - {}\n", error));
    }
    output
}
