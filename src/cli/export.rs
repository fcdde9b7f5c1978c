//! CLI commands for data export
//!
//! `preview`, `validate` and `run` share one set of option flags so the same
//! invocation can be checked, previewed and then executed.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{format_preview, format_validation_errors};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{
    default_filename, generate_preview, run_export, validate_export_options, CategorySelection,
    DateRange, ExportContext, ExportFormat, ExportOptions, ExportOutcome, StageProgressBar,
};
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::{parse_category, parse_date};

/// Options shared by every export subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output filename (defaults to expenses-export-<today>.<ext>)
    #[arg(short = 'o', long)]
    pub filename: Option<String>,

    /// Start of date range (YYYY-MM-DD); only applied together with --to
    #[arg(long)]
    pub from: Option<String>,

    /// End of date range (YYYY-MM-DD); only applied together with --from
    #[arg(long)]
    pub to: Option<String>,

    /// Only include this category (repeatable; omit for all categories)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Read base options from a JSON file; flags given here override it
    #[arg(long, value_name = "FILE")]
    pub options_file: Option<PathBuf>,
}

impl ExportArgs {
    /// Resolve the flags into export options
    pub fn to_options(&self, settings: &Settings, today: NaiveDate) -> ExpenseResult<ExportOptions> {
        let mut options = match &self.options_file {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    ExpenseError::Io(format!("Failed to read {}: {}", path.display(), e))
                })?;
                serde_json::from_str(&contents).map_err(|e| {
                    ExpenseError::Validation(format!(
                        "Invalid export options in {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
            None => ExportOptions::new(settings.default_export_format, ""),
        };

        if let Some(format) = self.format {
            options.format = format.to_string();
        }

        if let Some(filename) = &self.filename {
            options.filename = filename.clone();
        } else if options.filename.trim().is_empty() {
            options.filename = default_filename(&options.extension(), today);
        }

        if self.from.is_some() || self.to.is_some() {
            options.date_range = DateRange {
                start: self.from.as_deref().map(parse_date).transpose()?,
                end: self.to.as_deref().map(parse_date).transpose()?,
            };
        }

        if !self.categories.is_empty() {
            let selected = self
                .categories
                .iter()
                .map(|c| parse_category(c))
                .collect::<ExpenseResult<Vec<_>>>()?;
            options.categories = CategorySelection::Only(selected);
        }

        Ok(options)
    }
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Show what an export would contain without writing anything
    Preview {
        #[command(flatten)]
        args: ExportArgs,

        /// Print the preview as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check export options and list every problem found
    Validate {
        #[command(flatten)]
        args: ExportArgs,
    },

    /// Run the export and write the file
    Run {
        #[command(flatten)]
        args: ExportArgs,

        /// Directory to write into (defaults to the configured export directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Skip the staged progress display
        #[arg(long)]
        no_progress: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> ExpenseResult<()> {
    let today = Local::now().date_naive();

    match cmd {
        ExportCommands::Preview { args, json } => {
            let options = args.to_options(settings, today)?;
            let records = ExpenseService::new(storage).all()?;
            let preview = generate_preview(&records, &options, today);

            if json {
                println!("{}", serde_json::to_string_pretty(&preview)?);
            } else {
                print!("{}", format_preview(&preview));
            }
        }

        ExportCommands::Validate { args } => {
            let options = args.to_options(settings, today)?;
            let errors = validate_export_options(&options);

            if !errors.is_empty() {
                print!("{}", format_validation_errors(&errors));
                return Err(ExpenseError::InvalidExportOptions(errors));
            }
            println!("Export options are valid.");
        }

        ExportCommands::Run {
            args,
            output_dir,
            no_progress,
        } => {
            let options = args.to_options(settings, today)?;
            handle_export_run(storage, settings, &options, output_dir, no_progress)?;
        }
    }

    Ok(())
}

fn handle_export_run(
    storage: &Storage,
    settings: &Settings,
    options: &ExportOptions,
    output_dir: Option<PathBuf>,
    no_progress: bool,
) -> ExpenseResult<()> {
    let records = ExpenseService::new(storage).all()?;
    let ctx = ExportContext::now(settings.currency_symbol.clone());

    let show_progress = settings.show_progress && !no_progress;
    let interval = show_progress.then(|| Duration::from_millis(settings.progress_interval_ms));
    let bar = StageProgressBar::new(show_progress);

    let dir = output_dir.unwrap_or_else(|| settings.resolve_export_dir(storage.paths()));
    let ExportOutcome { artifact, path } =
        run_export(&records, options, &ctx, &dir, interval, |progress| {
            if progress.is_failure() {
                bar.abandon(&progress.message);
            } else {
                bar.update(progress);
            }
        })?;
    bar.finish();

    storage.log_export(
        artifact.filename.clone(),
        format!("{} records as {}", artifact.record_count, options.extension()),
        options,
    )?;

    println!(
        "Exported {} records to {}",
        artifact.record_count,
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
    }

    #[test]
    fn test_defaults_from_settings() {
        let settings = Settings {
            default_export_format: ExportFormat::Json,
            ..Settings::default()
        };

        let options = ExportArgs::default().to_options(&settings, today()).unwrap();
        assert_eq!(options.export_format().unwrap(), ExportFormat::Json);
        assert_eq!(options.filename, "expenses-export-2024-07-04.json");
        assert_eq!(options.categories, CategorySelection::All);
        assert_eq!(options.date_range, DateRange::default());
    }

    #[test]
    fn test_flags_build_options() {
        let args = ExportArgs {
            format: Some(ExportFormat::Pdf),
            filename: Some("q2".into()),
            from: Some("2024-04-01".into()),
            to: Some("2024-06-30".into()),
            categories: vec!["food".into(), "Bills".into()],
            options_file: None,
        };

        let options = args.to_options(&Settings::default(), today()).unwrap();
        assert_eq!(options.export_format().unwrap(), ExportFormat::Pdf);
        assert_eq!(options.filename, "q2");
        assert_eq!(
            options.date_range,
            DateRange::between(
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
            )
        );
        assert_eq!(
            options.categories,
            CategorySelection::Only(vec![Category::Food, Category::Bills])
        );
    }

    #[test]
    fn test_bad_flags_are_rejected() {
        let args = ExportArgs {
            from: Some("2024-31-01".into()),
            ..Default::default()
        };
        assert!(args.to_options(&Settings::default(), today()).is_err());

        let args = ExportArgs {
            categories: vec!["groceries".into()],
            ..Default::default()
        };
        assert!(args.to_options(&Settings::default(), today()).is_err());
    }

    #[test]
    fn test_options_file_with_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("options.json");
        fs::write(
            &path,
            r#"{"format": "json", "filename": "from-file",
                "dateRange": {"startDate": "", "endDate": ""},
                "selectedCategories": ["Shopping"], "includeAllCategories": false}"#,
        )
        .unwrap();

        let args = ExportArgs {
            format: Some(ExportFormat::Csv),
            options_file: Some(path),
            ..Default::default()
        };
        let options = args.to_options(&Settings::default(), today()).unwrap();
        assert_eq!(options.export_format().unwrap(), ExportFormat::Csv);
        assert_eq!(options.filename, "from-file");
        assert_eq!(
            options.categories,
            CategorySelection::Only(vec![Category::Shopping])
        );
    }
}
