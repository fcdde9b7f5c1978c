//! Spending trends
//!
//! Pure aggregations behind `expenses analytics`: a per-month trend ending in
//! the current month, per-day totals within the current month, and the
//! categories ranked by amount spent.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::models::{Category, Expense, Money};

/// Months shown in the trend, including the current one
pub const TREND_MONTHS: u32 = 6;

/// Most recent spending days shown for the current month
pub const DAILY_WINDOW: usize = 14;

/// Spending within one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    /// First day of the month
    pub month: NaiveDate,
    pub total: Money,
    pub count: usize,
}

/// Spending on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Money,
}

/// Everything `expenses analytics` shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingAnalytics {
    pub monthly_trend: Vec<MonthlyTotal>,
    pub daily_totals: Vec<DailyTotal>,
    pub category_ranking: Vec<(Category, Money)>,
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Totals for the `months` calendar months ending with the one containing
/// `today`, oldest first; months without spending are zero
pub fn monthly_trend(records: &[Expense], today: NaiveDate, months: u32) -> Vec<MonthlyTotal> {
    let Some(current) = today.with_day(1) else {
        return Vec::new();
    };

    (0..months)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .map(|month| {
            let in_month = records.iter().filter(|e| same_month(e.date, month));
            let (total, count) = in_month.fold((Money::zero(), 0), |(total, count), e| {
                (total + e.amount, count + 1)
            });
            MonthlyTotal {
                month,
                total,
                count,
            }
        })
        .collect()
}

/// Per-day totals for days in `today`'s month that have spending, in date
/// order, keeping only the last `window` of them
pub fn daily_totals(records: &[Expense], today: NaiveDate, window: usize) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for expense in records.iter().filter(|e| same_month(e.date, today)) {
        *by_day.entry(expense.date).or_default() += expense.amount;
    }

    let skip = by_day.len().saturating_sub(window);
    by_day
        .into_iter()
        .skip(skip)
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

/// Categories with spending, largest total first; ties keep `Category::ALL` order
pub fn category_ranking(records: &[Expense]) -> Vec<(Category, Money)> {
    let mut totals = [Money::zero(); 6];
    for expense in records {
        totals[expense.category.index()] += expense.amount;
    }

    let mut ranking: Vec<(Category, Money)> = Category::ALL
        .iter()
        .map(|c| (*c, totals[c.index()]))
        .filter(|(_, amount)| amount.is_positive())
        .collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    ranking
}

/// All three views for `today`
pub fn calculate_analytics(records: &[Expense], today: NaiveDate) -> SpendingAnalytics {
    SpendingAnalytics {
        monthly_trend: monthly_trend(records, today, TREND_MONTHS),
        daily_totals: daily_totals(records, today, DAILY_WINDOW),
        category_ranking: category_ranking(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(cents: i64, category: Category, on: NaiveDate) -> Expense {
        Expense::new(Money::from_cents(cents), "x", category, on)
    }

    #[test]
    fn test_monthly_trend_spans_year_boundary() {
        let records = vec![
            expense(1000, Category::Food, date(2023, 10, 31)),
            expense(500, Category::Food, date(2023, 11, 1)),
            expense(250, Category::Bills, date(2024, 2, 29)),
            expense(250, Category::Bills, date(2024, 2, 1)),
            expense(999, Category::Other, date(2024, 3, 1)),
        ];

        let trend = monthly_trend(&records, date(2024, 2, 15), 6);
        let months: Vec<NaiveDate> = trend.iter().map(|m| m.month).collect();
        assert_eq!(
            months,
            vec![
                date(2023, 9, 1),
                date(2023, 10, 1),
                date(2023, 11, 1),
                date(2023, 12, 1),
                date(2024, 1, 1),
                date(2024, 2, 1),
            ]
        );
        assert_eq!(trend[0].total, Money::zero());
        assert_eq!(trend[1].total, Money::from_cents(1000));
        assert_eq!(trend[2].count, 1);
        assert_eq!(trend[5].total, Money::from_cents(500));
        assert_eq!(trend[5].count, 2);
    }

    #[test]
    fn test_monthly_trend_from_month_end() {
        let trend = monthly_trend(&[], date(2024, 8, 31), 6);
        assert_eq!(trend.first().unwrap().month, date(2024, 3, 1));
        assert_eq!(trend.last().unwrap().month, date(2024, 8, 1));
    }

    #[test]
    fn test_daily_totals_current_month_only() {
        let records = vec![
            expense(100, Category::Food, date(2024, 5, 3)),
            expense(200, Category::Food, date(2024, 5, 3)),
            expense(700, Category::Bills, date(2024, 5, 1)),
            expense(900, Category::Bills, date(2024, 4, 30)),
        ];

        let daily = daily_totals(&records, date(2024, 5, 10), DAILY_WINDOW);
        assert_eq!(
            daily,
            vec![
                DailyTotal {
                    date: date(2024, 5, 1),
                    total: Money::from_cents(700)
                },
                DailyTotal {
                    date: date(2024, 5, 3),
                    total: Money::from_cents(300)
                },
            ]
        );
    }

    #[test]
    fn test_daily_totals_keep_latest_days() {
        let records: Vec<Expense> = (1..=20)
            .map(|day| expense(100, Category::Food, date(2024, 1, day)))
            .collect();

        let daily = daily_totals(&records, date(2024, 1, 25), DAILY_WINDOW);
        assert_eq!(daily.len(), 14);
        assert_eq!(daily[0].date, date(2024, 1, 7));
        assert_eq!(daily[13].date, date(2024, 1, 20));
    }

    #[test]
    fn test_category_ranking_drops_empty_categories() {
        let records = vec![
            expense(300, Category::Food, date(2024, 1, 1)),
            expense(5000, Category::Bills, date(2024, 1, 2)),
            expense(300, Category::Transportation, date(2024, 1, 3)),
        ];

        let ranking = category_ranking(&records);
        assert_eq!(
            ranking,
            vec![
                (Category::Bills, Money::from_cents(5000)),
                (Category::Food, Money::from_cents(300)),
                (Category::Transportation, Money::from_cents(300)),
            ]
        );
        assert!(category_ranking(&[]).is_empty());
    }
}
