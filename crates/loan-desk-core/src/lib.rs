pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "payments")]
pub mod payments;

#[cfg(feature = "origination")]
pub mod origination;

pub use error::LoanDeskError;
pub use types::*;

/// Standard result type for all loan-desk operations
pub type LoanDeskResult<T> = Result<T, LoanDeskError>;
