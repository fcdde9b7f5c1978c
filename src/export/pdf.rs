//! PDF Export functionality
//!
//! Produces a minimal single-page PDF 1.4 document: one Helvetica text block
//! with a title, generation date, aggregate total, record count and one
//! summary line for each of the first [`MAX_LISTED_RECORDS`] expenses. Totals
//! always cover the full record set, even when the listing is capped.

use chrono::NaiveDate;

use crate::models::{Expense, Money};

/// Maximum number of expenses listed in the document body
pub const MAX_LISTED_RECORDS: usize = 20;

/// Descriptions are cut to this many characters in the listing
pub const DESCRIPTION_LIMIT: usize = 30;

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;

/// Render the expense report as PDF bytes
pub fn render_pdf(records: &[Expense], generated_on: NaiveDate, currency_symbol: &str) -> Vec<u8> {
    let content = content_stream(records, generated_on, currency_symbol);

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /Resources << /Font << /F1 4 0 R >> >> \
             /MediaBox [0 0 {} {}] /Contents 5 0 R >>",
            PAGE_WIDTH, PAGE_HEIGHT
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
    ];

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", index + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    out.into_bytes()
}

fn content_stream(records: &[Expense], generated_on: NaiveDate, currency_symbol: &str) -> String {
    let total: Money = records.iter().map(|e| e.amount).sum();

    let mut lines = vec![
        "BT".to_string(),
        "/F1 12 Tf".to_string(),
        "50 750 Td".to_string(),
        show_text("Expense Report"),
        "0 -20 Td".to_string(),
        show_text(&format!("Generated: {}", generated_on.format("%-m/%-d/%Y"))),
        "0 -30 Td".to_string(),
        show_text(&format!(
            "Total Expenses: {}",
            total.format_with_symbol(currency_symbol)
        )),
        "0 -20 Td".to_string(),
        show_text(&format!("Total Records: {}", records.len())),
        "0 -40 Td".to_string(),
        show_text("--- Expense Details ---"),
    ];

    for expense in records.iter().take(MAX_LISTED_RECORDS) {
        let description: String = expense.description.chars().take(DESCRIPTION_LIMIT).collect();
        lines.push(format!(
            "0 -15 Td {}",
            show_text(&format!(
                "{} - {} - {} - {}",
                expense.date.format("%Y-%m-%d"),
                description,
                expense.category,
                expense.amount.format_with_symbol(currency_symbol)
            ))
        ));
    }

    lines.push("ET".to_string());
    lines.join("\n")
}

/// A `Tj` operator showing `text` as a literal string
fn show_text(text: &str) -> String {
    format!("({}) Tj", escape_pdf_text(text))
}

/// Escape a literal string; characters outside printable ASCII become `?`
fn escape_pdf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ' '..='~' => escaped.push(ch),
            _ => escaped.push('?'),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn records(n: usize) -> Vec<Expense> {
        (0..n)
            .map(|i| {
                Expense::new(
                    Money::from_cents(100),
                    format!("Item {}", i),
                    Category::Bills,
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                )
            })
            .collect()
    }

    fn render(records: &[Expense]) -> String {
        String::from_utf8(render_pdf(records, on(), "$")).unwrap()
    }

    #[test]
    fn test_header_and_trailer() {
        let pdf = render(&records(1));
        assert!(pdf.starts_with("%PDF-1.4\n"));
        assert!(pdf.ends_with("%%EOF\n"));
        assert!(pdf.contains("/BaseFont /Helvetica"));
        assert!(pdf.contains("(Generated: 3/5/2024) Tj"));
    }

    #[test]
    fn test_listing_is_capped_but_totals_are_not() {
        let pdf = render(&records(25));

        assert_eq!(pdf.matches("0 -15 Td (").count(), MAX_LISTED_RECORDS);
        assert!(pdf.contains("(Total Expenses: $25.00) Tj"));
        assert!(pdf.contains("(Total Records: 25) Tj"));
        assert!(pdf.contains("(2024-03-01 - Item 19 - Bills - $1.00) Tj"));
        assert!(!pdf.contains("Item 20"));
    }

    #[test]
    fn test_description_is_truncated() {
        let mut expense = records(1).remove(0);
        expense.description = "x".repeat(45);

        let pdf = render(&[expense]);
        let expected = format!(
            "(2024-03-01 - {} - Bills - $1.00) Tj",
            "x".repeat(DESCRIPTION_LIMIT)
        );
        assert!(pdf.contains(&expected));
        assert!(!pdf.contains(&"x".repeat(DESCRIPTION_LIMIT + 1)));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let pdf = render(&records(3));

        let startxref = pdf
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap();
        assert!(pdf[startxref..].starts_with("xref\n0 6\n"));

        let entries: Vec<usize> = pdf[startxref..]
            .lines()
            .skip(3)
            .take(5)
            .map(|line| line[..10].parse().unwrap())
            .collect();
        for (i, offset) in entries.iter().enumerate() {
            assert!(pdf[*offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn test_stream_length_matches_content() {
        let pdf = render(&records(2));
        let start = pdf.find("stream\n").unwrap() + "stream\n".len();
        let end = pdf.find("\nendstream").unwrap();

        let declared: usize = pdf
            .split("/Length ")
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert_eq!(declared, end - start);
    }

    #[test]
    fn test_escape_pdf_text() {
        assert_eq!(escape_pdf_text("a (b) \\ c"), "a \\(b\\) \\\\ c");
        assert_eq!(escape_pdf_text("café"), "caf?");
    }

    #[test]
    fn test_empty_report() {
        let pdf = render(&[]);
        assert!(pdf.contains("(Total Records: 0) Tj"));
        assert!(pdf.contains("(Total Expenses: $0.00) Tj"));
        assert_eq!(pdf.matches("0 -15 Td (").count(), 0);
    }
}
