//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, audit logging and derived statistics.

pub mod analytics;
pub mod expense;
pub mod summary;

pub use analytics::{
    calculate_analytics, category_ranking, daily_totals, monthly_trend, DailyTotal,
    MonthlyTotal, SpendingAnalytics,
};
pub use expense::{ExpenseFilter, ExpenseService};
pub use summary::{calculate_summary, ExpenseSummary};
