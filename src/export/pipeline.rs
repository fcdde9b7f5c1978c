//! Export pipeline
//!
//! validate → select → serialize → artifact. `run_export` also delivers the
//! artifact and wraps the work in the cosmetic stage sequence, ending with a
//! completion or failure update.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

use super::delivery::{deliver, ExportArtifact};
use super::options::{ExportFormat, ExportOptions};
use super::progress::{ExportProgress, ExportStage};
use super::select::select_records;
use super::validate::validate_export_options;
use super::{csv, json, pdf};

/// Values an export reads from its environment
#[derive(Debug, Clone)]
pub struct ExportContext {
    /// Timestamp written into structured exports
    pub exported_at: DateTime<Utc>,
    /// Local calendar date, used for default filenames and the report date
    pub today: NaiveDate,
    pub currency_symbol: String,
}

impl ExportContext {
    /// Context for an export happening now
    pub fn now(currency_symbol: impl Into<String>) -> Self {
        let local = Local::now();
        Self {
            exported_at: local.with_timezone(&Utc),
            today: local.date_naive(),
            currency_symbol: currency_symbol.into(),
        }
    }
}

/// Serialize `records` in `format`
pub fn serialize(records: &[Expense], format: ExportFormat, ctx: &ExportContext) -> ExpenseResult<Vec<u8>> {
    debug!(format = %format, records = records.len(), "serializing export");
    match format {
        ExportFormat::Csv => csv::export_csv(records).map(String::into_bytes),
        ExportFormat::Json => json::export_json(records, ctx.exported_at).map(String::into_bytes),
        ExportFormat::Pdf => Ok(pdf::render_pdf(records, ctx.today, &ctx.currency_symbol)),
    }
}

/// Validate `options`, select from `records` and serialize the result
///
/// Invalid options give `InvalidExportOptions`; a format name that names no
/// serializer gives `Export("Unsupported export format: ...")`.
pub fn build_artifact(
    records: &[Expense],
    options: &ExportOptions,
    ctx: &ExportContext,
) -> ExpenseResult<ExportArtifact> {
    let errors = validate_export_options(options);
    if !errors.is_empty() {
        return Err(ExpenseError::InvalidExportOptions(errors));
    }

    let format = options.export_format()?;
    let selected = select_records(records, options);
    let content = serialize(&selected, format, ctx)?;

    Ok(ExportArtifact {
        filename: options.artifact_filename(),
        content_type: format.content_type(),
        content,
        record_count: selected.len(),
    })
}

/// A delivered export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub artifact: ExportArtifact,
    /// Where the artifact was written
    pub path: PathBuf,
}

/// Build and deliver an artifact while reporting the stage sequence
///
/// Invalid options are rejected before any progress is emitted. When
/// `interval` is set, the stages before completion are paced by it. The
/// final stage is emitted only once the file is written; if serialization or
/// delivery fails a failure update is emitted instead.
pub fn run_export<F>(
    records: &[Expense],
    options: &ExportOptions,
    ctx: &ExportContext,
    destination: &Path,
    interval: Option<Duration>,
    mut on_progress: F,
) -> ExpenseResult<ExportOutcome>
where
    F: FnMut(&ExportProgress),
{
    let errors = validate_export_options(options);
    if !errors.is_empty() {
        return Err(ExpenseError::InvalidExportOptions(errors));
    }

    let interval = interval.unwrap_or(Duration::ZERO);
    let (last, working) = ExportStage::SEQUENCE
        .split_last()
        .map(|(last, rest)| (*last, rest))
        .unwrap_or((ExportStage::Complete, &[]));

    for stage in working {
        pause(interval);
        on_progress(&ExportProgress::for_stage(*stage));
    }

    let delivered = build_artifact(records, options, ctx).and_then(|artifact| {
        let path = deliver(&artifact, destination)?;
        Ok(ExportOutcome { artifact, path })
    });

    match delivered {
        Ok(outcome) => {
            pause(interval);
            on_progress(&ExportProgress::for_stage(last));
            info!(
                path = %outcome.path.display(),
                records = outcome.artifact.record_count,
                bytes = outcome.artifact.size(),
                "export complete"
            );
            Ok(outcome)
        }
        Err(e) => {
            warn!(error = %e, "export failed");
            on_progress(&ExportProgress::failed(ExportStage::Generating));
            Err(e)
        }
    }
}

fn pause(interval: Duration) {
    if !interval.is_zero() {
        std::thread::sleep(interval);
    }
}
