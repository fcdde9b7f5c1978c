//! Expense Tracker - command-line expense tracking with a multi-format export pipeline
//!
//! This library records expenses in a local JSON store and exports them as
//! CSV, JSON or a single-page PDF report, with previews, option validation and
//! a staged progress display.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, money, IDs)
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `export`: Selection, preview, serializers, progress and delivery
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::export::{build_artifact, ExportContext, ExportFormat, ExportOptions};
//!
//! let options = ExportOptions::new(ExportFormat::Csv, "march");
//! let artifact = build_artifact(&records, &options, &ExportContext::now("$"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
