use serde_json::Value;

/// Render a command result as indented JSON. Amounts stay as decimal strings.
pub fn render_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn print_json(value: &Value) {
    match render_json(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("failed to render JSON output: {e}"),
    }
}
