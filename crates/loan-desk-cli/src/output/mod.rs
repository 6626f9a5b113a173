pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The computation payload: the `result` of an envelope, or the value itself
/// for commands that return a bare record.
pub(crate) fn payload(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Render a scalar for a single table/CSV cell.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_unwraps_envelope() {
        let v = json!({"result": {"principal_paid": "10"}, "warnings": []});
        assert_eq!(payload(&v), &json!({"principal_paid": "10"}));
        let bare = json!({"principal_paid": "10"});
        assert_eq!(payload(&bare), &bare);
    }

    #[test]
    fn test_cell() {
        assert_eq!(cell(&json!("933.33")), "933.33");
        assert_eq!(cell(&json!(12)), "12");
        assert_eq!(cell(&Value::Null), "");
    }
}
