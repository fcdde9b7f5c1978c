//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, summaries and export previews
//! for terminal display.

pub mod analytics;
pub mod expense;
pub mod export;
pub mod summary;

pub use analytics::format_analytics;
pub use expense::{format_date, format_expense_details, format_expense_list};
pub use export::{format_preview, format_validation_errors};
pub use summary::format_summary;
