//! Core data models for the expense tracker
//!
//! Expenses, their closed category set, money amounts and identifiers.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{Category, CategoryParseError};
pub use expense::{Expense, ExpenseEdit, ExpenseValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
