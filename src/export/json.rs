//! JSON Export functionality
//!
//! Emits `{exportedAt, totalRecords, data: [...]}` pretty-printed with
//! two-space indentation.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, Money};

use super::iso_timestamp;

/// Top-level export document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport {
    /// Export timestamp (ISO 8601, millisecond precision)
    pub exported_at: String,

    /// Number of entries in `data`
    pub total_records: usize,

    /// The exported expenses
    pub data: Vec<JsonRecord>,
}

/// One exported expense
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonRecord {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: Category,
    /// Whole amounts are integers (`10`), others decimals (`10.5`)
    pub amount: Number,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Expense> for JsonRecord {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.as_uuid().to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            description: expense.description.clone(),
            category: expense.category,
            amount: amount_number(expense.amount),
            created_at: iso_timestamp(&expense.created_at),
            updated_at: iso_timestamp(&expense.updated_at),
        }
    }
}

fn amount_number(amount: Money) -> Number {
    if amount.cents_part() == 0 {
        return Number::from(amount.dollars());
    }
    Number::from_f64(amount.to_f64()).unwrap_or_else(|| Number::from(amount.dollars()))
}

impl JsonExport {
    /// Build the export document for `records`
    pub fn new(records: &[Expense], exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at: iso_timestamp(&exported_at),
            total_records: records.len(),
            data: records.iter().map(JsonRecord::from).collect(),
        }
    }
}

/// Write expenses as pretty-printed JSON
pub fn write_json<W: Write>(
    writer: &mut W,
    records: &[Expense],
    exported_at: DateTime<Utc>,
) -> ExpenseResult<()> {
    let export = JsonExport::new(records, exported_at);
    serde_json::to_writer_pretty(writer, &export).map_err(|e| ExpenseError::Export(e.to_string()))
}

/// Render expenses as a JSON string
pub fn export_json(records: &[Expense], exported_at: DateTime<Utc>) -> ExpenseResult<String> {
    let export = JsonExport::new(records, exported_at);
    serde_json::to_string_pretty(&export).map_err(|e| ExpenseError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{NaiveDate, TimeZone};

    fn records(n: usize) -> Vec<Expense> {
        (0..n)
            .map(|i| {
                Expense::new(
                    Money::from_cents(1000 + i as i64),
                    format!("Item {}", i),
                    Category::Shopping,
                    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                )
            })
            .collect()
    }

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_document_shape() {
        let json = export_json(&records(3), exported_at()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["exportedAt"], "2024-02-02T12:00:00.000Z");
        assert_eq!(value["totalRecords"], 3);
        assert_eq!(value["data"].as_array().unwrap().len(), 3);

        let first = &value["data"][0];
        assert_eq!(first["date"], "2024-02-01");
        assert_eq!(first["description"], "Item 0");
        assert_eq!(first["category"], "Shopping");
        assert!(first["amount"].is_i64());
        assert_eq!(first["amount"], 10);
        assert_eq!(value["data"][1]["amount"], 10.01);
        assert!(first["createdAt"].is_string());
        assert!(first["updatedAt"].is_string());
    }

    #[test]
    fn test_whole_amounts_have_no_fraction() {
        let json = export_json(&records(1), exported_at()).unwrap();
        assert!(json.contains("\"amount\": 10,"));
    }

    #[test]
    fn test_two_space_indentation() {
        let json = export_json(&records(1), exported_at()).unwrap();
        assert!(json.starts_with("{\n  \"exportedAt\""));
        assert!(json.contains("\n    {\n      \"id\""));
    }

    #[test]
    fn test_write_json_matches_export_json() {
        let input = records(2);
        let mut buffer = Vec::new();
        write_json(&mut buffer, &input, exported_at()).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            export_json(&input, exported_at()).unwrap()
        );
    }
}
