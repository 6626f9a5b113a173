use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialize a record piped on stdin.
///
/// An interactive terminal or an empty pipe yields `None`, which lets flag-only
/// invocations such as `loandesk amortize --principal ...` run under a harness
/// that always attaches a pipe.
pub fn read_piped<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(raw: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let record = serde_json::from_str(trimmed)
        .map_err(|e| format!("piped input is not a valid {}: {e}", short_type_name::<T>()))?;
    Ok(Some(record))
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_desk_core::payments::allocation::LoanBalances;

    #[test]
    fn test_empty_pipe_is_none() {
        assert!(parse_piped::<LoanBalances>("  \n").unwrap().is_none());
    }

    #[test]
    fn test_error_names_expected_record() {
        let err = parse_piped::<LoanBalances>(r#"{"principal":"100"}"#).unwrap_err();
        assert!(err.to_string().contains("LoanBalances"));
    }
}
