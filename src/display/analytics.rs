//! Analytics display formatting

use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};

use crate::services::SpendingAnalytics;

fn right_aligned(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    table.to_string()
}

/// Format the monthly trend, this month's daily totals and the category ranking
pub fn format_analytics(analytics: &SpendingAnalytics, currency_symbol: &str) -> String {
    let mut output = String::from("Monthly trend\n");

    let mut months = Builder::default();
    months.push_record(["Month", "Amount", "Expenses"]);
    for month in &analytics.monthly_trend {
        months.push_record([
            month.month.format("%b %Y").to_string(),
            month.total.format_with_symbol(currency_symbol),
            month.count.to_string(),
        ]);
    }
    output.push_str(&right_aligned(months));

    output.push_str("\n\nThis month by day\n");
    if analytics.daily_totals.is_empty() {
        output.push_str("No spending recorded this month.");
    } else {
        let mut days = Builder::default();
        days.push_record(["Day", "Amount"]);
        for day in &analytics.daily_totals {
            days.push_record([
                day.date.format("%b %d").to_string(),
                day.total.format_with_symbol(currency_symbol),
            ]);
        }
        output.push_str(&right_aligned(days));
    }

    output.push_str("\n\nTop categories\n");
    if analytics.category_ranking.is_empty() {
        output.push_str("No expenses yet.");
    } else {
        let mut categories = Builder::default();
        categories.push_record(["#", "Category", "Amount"]);
        for (rank, (category, amount)) in analytics.category_ranking.iter().enumerate() {
            categories.push_record([
                (rank + 1).to_string(),
                category.to_string(),
                amount.format_with_symbol(currency_symbol),
            ]);
        }
        output.push_str(&right_aligned(categories));
    }

    output.push('\n');
    output
}
