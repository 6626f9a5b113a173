use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::LoanDeskError;
use crate::LoanDeskResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as percentages (12 = 12% per annum), the way loan
/// products quote them. Never as fractions.
pub type Percent = Decimal;

/// Number of decimal places every monetary output is rounded to.
pub const MONEY_DP: u32 = 2;

/// Round a monetary amount to cents, half away from zero.
///
/// `0.005` becomes `0.01` and `-0.005` becomes `-0.01`. Every amount the
/// calculators return passes through here so that cent-level reconciliation
/// against stored loan records is reproducible. The result always carries
/// exactly two decimal places (`1000` becomes `1000.00`).
pub fn round_money(amount: Money) -> Money {
    let mut rounded = amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    rounded
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
    pub rounding: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
            rounding: "2dp_half_away_from_zero".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Shared input checks
// ---------------------------------------------------------------------------

pub(crate) fn require_positive(field: &str, value: Decimal) -> LoanDeskResult<()> {
    if value <= Decimal::ZERO {
        return Err(LoanDeskError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> LoanDeskResult<()> {
    if value < Decimal::ZERO {
        return Err(LoanDeskError::invalid(field, "must not be negative"));
    }
    Ok(())
}

/// Amounts entered on a loan are whole cents.
pub(crate) fn require_cents(field: &str, value: Decimal) -> LoanDeskResult<()> {
    if value.normalize().scale() > MONEY_DP {
        return Err(LoanDeskError::invalid(
            field,
            format!("must have at most {MONEY_DP} decimal places, got {value}"),
        ));
    }
    Ok(())
}
