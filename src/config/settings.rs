//! User settings for the expense tracker
//!
//! Manages display preferences, export defaults and logging level.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::export::ExportFormat;

/// User settings, persisted as `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in tables and documents
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format) for terminal output
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Format used when `--format` is not given
    #[serde(default)]
    pub default_export_format: ExportFormat,

    /// Delay between simulated export stages, in milliseconds
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    /// Whether `export run` shows the staged progress bar
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,

    /// Where artifacts are written (defaults to `<base>/exports`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Log filter used when neither `-v` nor `RUST_LOG` is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_progress_interval_ms() -> u64 {
    500
}

fn default_show_progress() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_export_format: ExportFormat::default(),
            progress_interval_ms: default_progress_interval_ms(),
            show_progress: default_show_progress(),
            export_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Directory export artifacts are delivered to
    pub fn resolve_export_dir(&self, paths: &ExpensePaths) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| paths.export_dir())
    }

    /// Update one setting from its textual form
    ///
    /// An empty value for `export_dir` resets it to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ExpenseError> {
        let invalid = |expected: &str| {
            ExpenseError::Config(format!(
                "Invalid value '{}' for {}: expected {}",
                value, key, expected
            ))
        };

        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => {
                if !renders_dates(value) {
                    return Err(invalid("a strftime format with date fields only"));
                }
                self.date_format = value.to_string();
            }
            "default_export_format" => {
                self.default_export_format = value.parse()?;
            }
            "progress_interval_ms" => {
                self.progress_interval_ms = value
                    .parse()
                    .map_err(|_| invalid("a number of milliseconds"))?;
            }
            "show_progress" => {
                self.show_progress = value.parse().map_err(|_| invalid("true or false"))?;
            }
            "export_dir" => {
                self.export_dir = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "log_level" => self.log_level = value.to_string(),
            _ => {
                return Err(ExpenseError::Config(format!(
                    "Unknown setting '{}'. Known settings: {}",
                    key,
                    SETTABLE_KEYS.join(", ")
                )))
            }
        }

        Ok(())
    }
}

/// Whether `format` is a strftime pattern chrono can render for a bare date
///
/// Time fields such as `%H` parse fine but fail when a `NaiveDate` is
/// formatted, so a sample date is rendered as well.
pub fn renders_dates(format: &str) -> bool {
    if format.trim().is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }

    let Some(sample) = NaiveDate::from_ymd_opt(2024, 1, 15) else {
        return false;
    };
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format)).is_ok()
}

/// Keys accepted by [`Settings::set`]
pub const SETTABLE_KEYS: [&str; 7] = [
    "currency_symbol",
    "date_format",
    "default_export_format",
    "progress_interval_ms",
    "show_progress",
    "export_dir",
    "log_level",
];
