//! Expense service
//!
//! Provides business logic for expense management: validated CRUD against the
//! repository, lookup by full or short ID, and filtered listing. Every
//! mutation is saved immediately and recorded in the audit log.

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, ExpenseEdit, ExpenseId, Money};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Filter by category (`None` means all categories)
    pub category: Option<Category>,
    /// Filter by date range start; only applied together with `end_date`
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end; only applied together with `start_date`
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive search over description, category and amount
    pub search: Option<String>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by inclusive date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Filter by search term
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a single expense passes every criterion
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = self.category {
            if expense.category != category {
                return false;
            }
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if expense.date < start || expense.date > end {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let needle = term.to_lowercase();
                expense.description.to_lowercase().contains(&needle)
                    || expense.category.name().to_lowercase().contains(&needle)
                    || expense.amount.to_plain_decimal().contains(term)
            }
            _ => true,
        }
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense
    pub fn create(
        &self,
        amount: Money,
        description: &str,
        category: Category,
        date: NaiveDate,
    ) -> ExpenseResult<Expense> {
        let expense = Expense::new(amount, description.trim(), category, date);

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.expenses.add(expense.clone())?;
        self.storage.save_all()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        info!(id = %expense.id, amount = %expense.amount, "created expense");
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full ID or by a unique short-ID prefix
    pub fn find(&self, identifier: &str) -> ExpenseResult<Expense> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self
                .storage
                .expenses
                .get(id)?
                .ok_or_else(|| ExpenseError::expense_not_found(identifier));
        }

        let mut matches: Vec<Expense> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| e.id.matches_short(identifier))
            .collect();

        match matches.len() {
            0 => Err(ExpenseError::expense_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(ExpenseError::Ambiguous {
                entity_type: "Expense",
                identifier: identifier.to_string(),
                matches: n,
            }),
        }
    }

    /// All expenses in insertion order
    pub fn all(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// List matching expenses, newest date first
    ///
    /// Same-day expenses are ordered by most recently recorded; the limit
    /// keeps the newest.
    pub fn list(&self, filter: &ExpenseFilter) -> ExpenseResult<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();

        expenses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        Ok(expenses)
    }

    /// Apply an edit to an existing expense
    pub fn update(&self, id: ExpenseId, edit: &ExpenseEdit) -> ExpenseResult<Expense> {
        if edit.is_empty() {
            return Err(ExpenseError::Validation("No changes specified".into()));
        }

        let before = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let mut after = before.apply_edit(edit);
        after.description = after.description.trim().to_string();

        after
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if !self.storage.expenses.update(after.clone())? {
            return Err(ExpenseError::expense_not_found(id.to_string()));
        }
        self.storage.save_all()?;

        self.storage.log_update(
            EntityType::Expense,
            after.id.to_string(),
            Some(after.description.clone()),
            &before,
            &after,
        )?;

        info!(id = %after.id, "updated expense");
        Ok(after)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        self.storage.save_all()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        info!(id = %expense.id, "deleted expense");
        Ok(expense)
    }

    /// Delete every expense, returning how many were removed
    pub fn clear(&self) -> ExpenseResult<usize> {
        let removed = self.storage.expenses.get_all()?;
        self.storage.expenses.clear()?;
        self.storage.save_all()?;

        for expense in &removed {
            self.storage.log_delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.description.clone()),
                expense,
            )?;
        }

        info!(count = removed.len(), "cleared expenses");
        Ok(removed.len())
    }
}
