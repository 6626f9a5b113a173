use serde_json::Value;

use super::{cell, payload};

/// Key answer fields, in priority order.
const PRIORITY_KEYS: [&str; 6] = [
    "monthly_installment",
    "net_disbursement",
    "outstanding_after",
    "outstanding_balance",
    "principal_paid",
    "total_amount",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in priority order (one level deep, so
/// a quote's nested amortization is found), then falls back to the first field.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(payload(value)));
}

fn minimal_line(result: &Value) -> String {
    let Value::Object(map) = result else {
        return cell(result);
    };

    for key in &PRIORITY_KEYS {
        if let Some(val) = map.get(*key).filter(|v| !v.is_null()) {
            return cell(val);
        }
    }
    for nested in map.values().filter_map(Value::as_object) {
        for key in &PRIORITY_KEYS {
            if let Some(val) = nested.get(*key).filter(|v| !v.is_null()) {
                return cell(val);
            }
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, cell(val)),
        None => String::new(),
    }
}
