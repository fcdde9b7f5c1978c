//! Export module for the expense tracker
//!
//! Turns a record set into a downloadable artifact:
//! - Selection by inclusive date range and category
//! - Preview with record count and size estimate
//! - Serialization to CSV, JSON or a single-page PDF report
//! - Cosmetic stage-by-stage progress and delivery to a directory

pub mod csv;
pub mod delivery;
pub mod json;
pub mod options;
pub mod pdf;
pub mod pipeline;
pub mod preview;
pub mod progress;
pub mod select;
pub mod validate;

use chrono::{DateTime, SecondsFormat, Utc};

pub use csv::{export_csv, write_csv, CSV_HEADER};
pub use delivery::{deliver, ExportArtifact};
pub use json::{export_json, write_json, JsonExport, JsonRecord};
pub use options::{CategorySelection, DateRange, ExportFormat, ExportOptions};
pub use pdf::render_pdf;
pub use pipeline::{build_artifact, run_export, serialize, ExportContext, ExportOutcome};
pub use preview::{default_filename, estimate_file_size, generate_preview, ExportPreview};
pub use progress::{
    simulate_export_progress, ExportProgress, ExportStage, StageProgressBar,
    DEFAULT_STAGE_INTERVAL,
};
pub use select::select_records;
pub use validate::validate_export_options;

/// ISO 8601 UTC timestamp with millisecond precision, e.g. `2024-01-15T08:30:00.000Z`
pub(crate) fn iso_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
