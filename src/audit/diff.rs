//! Diff generation for audit logging

use serde_json::Value;

/// Fields that change on every edit and would only add noise to a diff
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Generate a human-readable diff of top-level field changes between two JSON objects
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after).then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let changes: Vec<String> = before_obj
        .iter()
        .filter(|(key, _)| !IGNORED_FIELDS.contains(&key.as_str()))
        .filter_map(|(key, before_val)| match after_obj.get(key) {
            Some(after_val) if after_val != before_val => Some(format!(
                "{}: {} -> {}",
                key,
                format_value(before_val),
                format_value(after_val)
            )),
            Some(_) => None,
            None => Some(format!("{}: {} -> (removed)", key, format_value(before_val))),
        })
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields() {
        let before = json!({"amount": 100, "description": "Tea", "updated_at": "a"});
        let after = json!({"amount": 150, "description": "Tea", "updated_at": "b"});

        assert_eq!(
            generate_diff(&before, &after),
            Some("amount: 100 -> 150".to_string())
        );
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"description": "Tea"});
        assert_eq!(generate_diff(&value, &value), None);
    }

    #[test]
    fn test_string_values_are_quoted() {
        let before = json!({"category": "Food"});
        let after = json!({"category": "Other"});
        assert_eq!(
            generate_diff(&before, &after),
            Some("category: \"Food\" -> \"Other\"".to_string())
        );
    }
}
