use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanDeskError;
use crate::types::{Money, Percent};
use crate::LoanDeskResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Convert an annual percentage rate into a monthly fractional rate
/// (`12` becomes `0.01`).
pub fn monthly_rate(annual_rate: Percent) -> Decimal {
    annual_rate / MONTHS_PER_YEAR / PERCENT
}

/// Compound growth factor `(1 + rate)^periods`.
pub fn compound_factor(rate: Decimal, periods: u32) -> LoanDeskResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| {
            LoanDeskError::invalid(
                "tenure_months",
                format!("(1 + {rate})^{periods} overflows decimal arithmetic"),
            )
        })
}

/// Level installment that repays `principal` over `periods` at a periodic
/// `rate` (the annuity formula `P·r·(1+r)^n / ((1+r)^n − 1)`).
///
/// A zero rate degenerates the formula, so it is special-cased to
/// straight-line repayment `P / n`.
pub fn level_installment(principal: Money, rate: Decimal, periods: u32) -> LoanDeskResult<Money> {
    if periods == 0 {
        return Err(LoanDeskError::invalid(
            "tenure_months",
            "number of periods must be greater than zero",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = compound_factor(rate, periods)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        // rate so small the factor rounds to exactly one
        return Ok(principal / Decimal::from(periods));
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| LoanDeskError::invalid("principal", "installment overflows decimal arithmetic"))
}
