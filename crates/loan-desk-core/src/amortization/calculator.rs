//! Loan amortization calculator.
//!
//! Maps a set of loan terms to the summary figures stored on a loan record:
//! total interest, total amount payable, level monthly installment and the
//! upfront processing fee. Three interest conventions are supported:
//!
//! 1. **Declining balance** -- annuity installment on a reducing balance.
//! 2. **Flat** -- interest charged on the original principal for the whole tenure.
//! 3. **Simple** -- annual simple interest over the tenure expressed in years.
//!
//! All arithmetic uses `rust_decimal::Decimal`. Every monetary output is rounded
//! to cents half away from zero, and `total_amount` is built from the rounded
//! `total_interest` so that `total_amount == principal + total_interest` holds
//! exactly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanDeskError;
use crate::time_value::{level_installment, monthly_rate};
use crate::types::*;
use crate::LoanDeskResult;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// How interest is computed over the life of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum InterestMethod {
    /// Reducing balance, level installment (annuity formula).
    Declining,
    /// Interest on the original principal for the full tenure.
    Flat,
    /// Annual simple interest on the principal.
    Simple,
}

impl InterestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestMethod::Declining => "declining",
            InterestMethod::Flat => "flat",
            InterestMethod::Simple => "simple",
        }
    }
}

impl fmt::Display for InterestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterestMethod {
    type Err = LoanDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "declining" => Ok(InterestMethod::Declining),
            "flat" => Ok(InterestMethod::Flat),
            "simple" => Ok(InterestMethod::Simple),
            other => Err(LoanDeskError::invalid(
                "method",
                format!("unrecognized interest calculation method '{other}' (expected declining, flat or simple)"),
            )),
        }
    }
}

impl TryFrom<String> for InterestMethod {
    type Error = LoanDeskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Terms of a loan as entered on an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Annual interest rate as a percentage.
    pub annual_rate: Percent,
    pub tenure_months: u32,
    pub method: InterestMethod,
    #[serde(default)]
    pub processing_fee_percentage: Percent,
    #[serde(default)]
    pub processing_fee_flat: Money,
}

/// Summary figures for a loan, rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub interest_rate: Percent,
    pub total_interest: Money,
    pub total_amount: Money,
    pub monthly_installment: Money,
    pub processing_fee: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the amortization summary for a set of loan terms.
pub fn compute_amortization(terms: &LoanTerms) -> LoanDeskResult<AmortizationResult> {
    validate_terms(terms)?;

    tracing::debug!(
        principal = %terms.principal,
        rate = %terms.annual_rate,
        tenure = terms.tenure_months,
        method = %terms.method,
        "computing amortization"
    );

    let principal = terms.principal;
    let n = Decimal::from(terms.tenure_months);

    let (raw_interest, raw_installment) = match terms.method {
        InterestMethod::Declining => {
            let r = monthly_rate(terms.annual_rate);
            if r.is_zero() {
                (Decimal::ZERO, principal / n)
            } else {
                let installment = level_installment(principal, r, terms.tenure_months)?;
                let repaid = installment
                    .checked_mul(n)
                    .ok_or_else(|| overflow("tenure_months", "total repayment"))?;
                (repaid - principal, installment)
            }
        }
        InterestMethod::Flat => {
            let interest = principal
                .checked_mul(terms.annual_rate)
                .and_then(|v| v.checked_mul(n))
                .map(|v| v / dec!(1200))
                .ok_or_else(|| overflow("annual_rate", "flat interest"))?;
            (interest, spread(principal, interest, n)?)
        }
        InterestMethod::Simple => {
            let years = n / dec!(12);
            let interest = principal
                .checked_mul(terms.annual_rate)
                .and_then(|v| v.checked_mul(years))
                .map(|v| v / dec!(100))
                .ok_or_else(|| overflow("annual_rate", "simple interest"))?;
            (interest, spread(principal, interest, n)?)
        }
    };

    let processing_fee = principal
        .checked_mul(terms.processing_fee_percentage)
        .map(|v| v / dec!(100))
        .and_then(|v| v.checked_add(terms.processing_fee_flat))
        .ok_or_else(|| overflow("processing_fee_percentage", "processing fee"))?;

    let total_interest = round_money(raw_interest);
    let total_amount = principal
        .checked_add(total_interest)
        .ok_or_else(|| overflow("principal", "total amount"))?;

    Ok(AmortizationResult {
        interest_rate: terms.annual_rate,
        total_interest,
        total_amount,
        monthly_installment: round_money(raw_installment),
        processing_fee: round_money(processing_fee),
    })
}

/// Level installment for flat and simple loans: principal plus interest over `n`.
fn spread(principal: Money, interest: Money, n: Decimal) -> LoanDeskResult<Money> {
    principal
        .checked_add(interest)
        .map(|total| total / n)
        .ok_or_else(|| overflow("principal", "total amount"))
}

fn overflow(field: &str, what: &str) -> LoanDeskError {
    LoanDeskError::invalid(field, format!("{what} overflows decimal arithmetic"))
}

fn validate_terms(terms: &LoanTerms) -> LoanDeskResult<()> {
    require_positive("principal", terms.principal)?;
    require_cents("principal", terms.principal)?;
    if terms.tenure_months == 0 {
        return Err(LoanDeskError::invalid(
            "tenure_months",
            "tenure must be at least one month",
        ));
    }
    require_non_negative("annual_rate", terms.annual_rate)?;
    require_non_negative("processing_fee_percentage", terms.processing_fee_percentage)?;
    require_non_negative("processing_fee_flat", terms.processing_fee_flat)?;
    Ok(())
}
