//! Summary display formatting

use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};

use crate::services::ExpenseSummary;

/// Format the spending summary: headline figures, then a category table
pub fn format_summary(summary: &ExpenseSummary, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total spent:     {}\n",
        summary.total_amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "This month:      {}\n",
        summary.monthly_amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("Expenses:        {}\n", summary.expense_count));
    output.push_str(&format!(
        "Average expense: {}\n\n",
        summary.average_expense.format_with_symbol(currency_symbol)
    ));

    let mut builder = Builder::default();
    builder.push_record(["Category", "Amount", "Share"]);
    for (category, amount) in &summary.category_breakdown {
        let share = if summary.total_amount.is_zero() {
            0.0
        } else {
            amount.cents() as f64 * 100.0 / summary.total_amount.cents() as f64
        };
        builder.push_record([
            category.to_string(),
            amount.format_with_symbol(currency_symbol),
            format!("{:.1}%", share),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));

    output.push_str(&table.to_string());
    output
}
