//! Progress reporting for export operations
//!
//! The stage sequence is cosmetic: five fixed stages emitted on a timer,
//! independent of the serializer. `simulate_export_progress` drives any
//! callback; `StageProgressBar` renders the stages in the terminal.

use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Pause before each stage is emitted
pub const DEFAULT_STAGE_INTERVAL: Duration = Duration::from_millis(500);

/// Message reported when an export fails
pub const FAILURE_MESSAGE: &str = "Export failed. Please try again.";

/// Named stage of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Filtering,
    Formatting,
    Generating,
    Complete,
}

impl ExportStage {
    /// Stages in emission order
    pub const SEQUENCE: [ExportStage; 5] = [
        ExportStage::Preparing,
        ExportStage::Filtering,
        ExportStage::Formatting,
        ExportStage::Generating,
        ExportStage::Complete,
    ];

    pub fn percent(&self) -> u8 {
        match self {
            Self::Preparing => 0,
            Self::Filtering => 25,
            Self::Formatting => 50,
            Self::Generating => 75,
            Self::Complete => 100,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Preparing => "Preparing export...",
            Self::Filtering => "Filtering data...",
            Self::Formatting => "Formatting data...",
            Self::Generating => "Generating file...",
            Self::Complete => "Export complete!",
        }
    }
}

/// One progress update handed to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportProgress {
    pub stage: ExportStage,
    pub percent: u8,
    pub message: String,
}

impl ExportProgress {
    pub fn for_stage(stage: ExportStage) -> Self {
        Self {
            stage,
            percent: stage.percent(),
            message: stage.message().to_string(),
        }
    }

    /// Terminal update for a failed export; keeps the stage reached so far
    pub fn failed(stage: ExportStage) -> Self {
        Self {
            stage,
            percent: stage.percent(),
            message: FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.message == FAILURE_MESSAGE
    }
}

/// Emit every stage in order, sleeping `interval` before each one
///
/// Returns once the final stage has been emitted. There is no cancellation.
pub fn simulate_export_progress<F>(interval: Duration, mut on_progress: F)
where
    F: FnMut(&ExportProgress),
{
    for stage in ExportStage::SEQUENCE {
        if !interval.is_zero() {
            thread::sleep(interval);
        }
        on_progress(&ExportProgress::for_stage(stage));
    }
}

/// Terminal progress bar for the stage sequence
pub struct StageProgressBar {
    bar: Option<ProgressBar>,
}

impl StageProgressBar {
    /// Create a bar; when `enable_bar` is false every call is a no-op
    pub fn new(enable_bar: bool) -> Self {
        let bar = if enable_bar {
            let bar = ProgressBar::new(100);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            {
                bar.set_style(style.progress_chars("#>-"));
            }
            Some(bar)
        } else {
            None
        };

        Self { bar }
    }

    /// Show a progress update
    pub fn update(&self, progress: &ExportProgress) {
        if let Some(ref bar) = self.bar {
            bar.set_position(u64::from(progress.percent));
            bar.set_message(progress.message.clone());
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }

    /// Leave the bar on screen with a failure message
    pub fn abandon(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}
