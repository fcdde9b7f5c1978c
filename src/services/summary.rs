//! Spending summary
//!
//! Aggregates over a record set: overall total, the total for the current
//! calendar month, a per-category breakdown and the average expense.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Category, Expense, Money};

/// Aggregate statistics for a set of expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub total_amount: Money,
    /// Total of expenses dated in the month containing the reference day
    pub monthly_amount: Money,
    /// One entry per category in `Category::ALL` order, zero-filled
    pub category_breakdown: Vec<(Category, Money)>,
    pub expense_count: usize,
    /// Mean amount, rounded to the cent; zero for an empty set
    pub average_expense: Money,
}

impl ExpenseSummary {
    /// Total for one category
    pub fn category_total(&self, category: Category) -> Money {
        self.category_breakdown
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, amount)| *amount)
            .unwrap_or_default()
    }
}

/// Summarise `records`, treating `today` as the reference day for the monthly total
pub fn calculate_summary(records: &[Expense], today: NaiveDate) -> ExpenseSummary {
    let total_amount: Money = records.iter().map(|e| e.amount).sum();

    let monthly_amount: Money = records
        .iter()
        .filter(|e| e.date.year() == today.year() && e.date.month() == today.month())
        .map(|e| e.amount)
        .sum();

    let mut totals = [Money::zero(); 6];
    for expense in records {
        totals[expense.category.index()] += expense.amount;
    }
    let category_breakdown = Category::ALL
        .iter()
        .map(|c| (*c, totals[c.index()]))
        .collect();

    let average_expense = if records.is_empty() {
        Money::zero()
    } else {
        Money::from_cents((total_amount.cents() as f64 / records.len() as f64).round() as i64)
    };

    ExpenseSummary {
        total_amount,
        monthly_amount,
        category_breakdown,
        expense_count: records.len(),
        average_expense,
    }
}
