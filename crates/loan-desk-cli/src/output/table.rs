use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::cell;

/// Format output as tables using the tabled crate.
///
/// Scalar fields go into a `Field | Value` table; list fields such as a
/// schedule's installments get a table of their own, and nested records
/// (a quote's amortization) are flattened with dotted field names.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result_table(result, map),
            None => print_object(map),
        },
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        other => println!("{}", cell(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut lists: Vec<(&str, &[Value])> = Vec::new();
    push_fields(&mut builder, "", map, &mut lists);
    println!("{}", Table::from(builder));

    for (name, rows) in lists {
        println!("\n{}:", name);
        print_array_table(rows);
    }
}

fn push_fields<'a>(
    builder: &mut Builder,
    prefix: &str,
    map: &'a Map<String, Value>,
    lists: &mut Vec<(&'a str, &'a [Value])>,
) {
    for (key, val) in map {
        match val {
            Value::Object(nested) => {
                push_fields(builder, &format!("{prefix}{key}."), nested, lists);
            }
            Value::Array(rows) if rows.iter().any(Value::is_object) => {
                lists.push((key.as_str(), rows.as_slice()));
            }
            _ => builder.push_record([format!("{prefix}{key}"), display(val)]),
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(display).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", display(item));
        }
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr.iter().map(display).collect::<Vec<_>>().join(", "),
        other => cell(other),
    }
}
