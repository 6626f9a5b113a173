use colored::Colorize;
use serde_json::Value;
use std::io;

use super::{cell, payload};

/// Write output as CSV to stdout.
///
/// A result holding an `installments` list is written one row per
/// installment; any other object becomes two-column `field,value` rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("{} failed to write CSV output: {e}", "error:".red().bold());
    }
}

fn write_csv<W: io::Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    match payload(value) {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("installments") {
                write_array_csv(&mut wtr, rows)?;
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in map {
                    wtr.write_record([key.as_str(), &cell(val)])?;
                }
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr)?,
        other => wtr.write_record([&cell(other)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([&cell(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(cell).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}
