pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve structured input from `--input FILE`, then piped stdin.
///
/// Returns `None` when neither is present so the caller can fall back to
/// individual flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_structured(path)?));
    }
    stdin::read_piped()
}
