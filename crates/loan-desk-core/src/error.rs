use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanDeskError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanDeskError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanDeskError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LoanDeskError {
    fn from(e: serde_json::Error) -> Self {
        LoanDeskError::SerializationError(e.to_string())
    }
}
