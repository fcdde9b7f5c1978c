//! Expense model
//!
//! An expense is replaced wholesale on edit: the id and creation time are kept,
//! every other field may change and the modification time is bumped.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Free-text description
    pub description: String,

    /// Spending category
    pub category: Category,

    /// Transaction date
    pub date: NaiveDate,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

/// Field changes for an existing expense; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct ExpenseEdit {
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

impl ExpenseEdit {
    /// Whether the edit changes nothing
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }
}

impl Expense {
    /// Create a new expense
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            amount,
            description: description.into(),
            category,
            date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Return the edited record, keeping id and creation time
    pub fn apply_edit(&self, edit: &ExpenseEdit) -> Self {
        Self {
            id: self.id,
            amount: edit.amount.unwrap_or(self.amount),
            description: edit
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            category: edit.category.unwrap_or(self.category),
            date: edit.date.unwrap_or(self.date),
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.description, self.amount, self.category
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    EmptyDescription,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be greater than 0"),
            Self::EmptyDescription => write!(f, "Description is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee() -> Expense {
        Expense::new(
            Money::from_cents(4250),
            "Coffee",
            Category::Food,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_new_expense() {
        let expense = coffee();
        assert_eq!(expense.amount.cents(), 4250);
        assert_eq!(expense.created_at, expense.updated_at);
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut expense = coffee();
        expense.amount = Money::zero();
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NonPositiveAmount)
        );

        let mut expense = coffee();
        expense.description = "   ".into();
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::EmptyDescription)
        );
    }

    #[test]
    fn test_apply_edit_preserves_identity() {
        let expense = coffee();
        let edit = ExpenseEdit {
            amount: Some(Money::from_cents(500)),
            category: Some(Category::Other),
            ..ExpenseEdit::default()
        };

        let edited = expense.apply_edit(&edit);
        assert_eq!(edited.id, expense.id);
        assert_eq!(edited.created_at, expense.created_at);
        assert!(edited.updated_at >= expense.updated_at);
        assert_eq!(edited.amount.cents(), 500);
        assert_eq!(edited.category, Category::Other);
        assert_eq!(edited.description, "Coffee");
        assert_eq!(edited.date, expense.date);
    }

    #[test]
    fn test_serialization_round_trip() {
        let expense = coffee();
        let json = serde_json::to_string(&expense).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense, back);
        assert!(json.contains("\"date\":\"2024-01-15\""));
    }
}
