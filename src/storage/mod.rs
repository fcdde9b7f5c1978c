//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes and an append-only audit log.
//! The expense collection is read and written as a whole under a single file.

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};

use serde::Serialize;
use tracing::{debug, warn};

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Main storage coordinator
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// Access the audit log
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), ExpenseError> {
        self.expenses.load()?;
        debug!(count = self.expenses.count()?, "loaded expenses");
        Ok(())
    }

    /// Load all data, degrading to an empty collection if the file can't be read
    pub fn load_lenient(&mut self) -> Result<(), ExpenseError> {
        if let Err(err) = self.expenses.load() {
            warn!(
                path = %self.expenses.path().display(),
                error = %err,
                "could not load expenses, starting with an empty collection"
            );
            self.expenses.replace_all(Vec::new())?;
        }
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), ExpenseError> {
        self.expenses.save().map_err(|err| {
            warn!(
                path = %self.expenses.path().display(),
                error = %err,
                "failed to save expenses"
            );
            err
        })
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update in the audit log, with a field diff
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), ExpenseError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };

        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Record a delivered export in the audit log
    pub fn log_export<T: Serialize>(
        &self,
        filename: impl Into<String>,
        summary: String,
        details: &T,
    ) -> Result<(), ExpenseError> {
        self.audit.log(&AuditEntry::export(filename, summary, details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Category, Expense, Money};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, _storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_load_lenient_degrades_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        fs::write(paths.expenses_file(), "{ this is not json").unwrap();

        let mut storage = Storage::new(paths).unwrap();
        assert!(storage.load_all().is_err());
        storage.load_lenient().unwrap();
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_audit_helpers() {
        let (_temp_dir, storage) = create_test_storage();
        let before = Expense::new(
            Money::from_cents(100),
            "Bus",
            Category::Transportation,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        let mut after = before.clone();
        after.amount = Money::from_cents(250);

        storage
            .log_create(EntityType::Expense, before.id.to_string(), None, &before)
            .unwrap();
        storage
            .log_update(EntityType::Expense, before.id.to_string(), None, &before, &after)
            .unwrap();
        storage
            .log_delete(EntityType::Expense, before.id.to_string(), None, &after)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].operation, Operation::Update);
        assert_eq!(entries[1].diff_summary.as_deref(), Some("amount: 100 -> 250"));
        assert_eq!(entries[2].operation, Operation::Delete);
    }
}
