//! Loan products and origination quotes.
//!
//! A product carries the pricing (rate, interest method, processing fees) and
//! the limits an application must fall within. Quoting an application checks
//! those limits, runs the amortization calculator and derives the figures
//! recorded when the loan is created: net disbursement and maturity date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::calculator::{
    compute_amortization, AmortizationResult, InterestMethod, LoanTerms,
};
use crate::amortization::schedule::add_months;
use crate::error::LoanDeskError;
use crate::types::*;
use crate::LoanDeskResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepaymentFrequency {
    Daily,
    Weekly,
    Biweekly,
    #[default]
    Monthly,
}

/// A configured loan product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    pub name: String,
    /// Annual rate as a percentage.
    pub interest_rate: Percent,
    pub interest_calculation: InterestMethod,
    #[serde(default)]
    pub processing_fee_percentage: Percent,
    #[serde(default)]
    pub processing_fee_flat: Money,
    pub min_amount: Money,
    pub max_amount: Money,
    pub min_tenure_months: u32,
    pub max_tenure_months: u32,
    #[serde(default)]
    pub repayment_frequency: RepaymentFrequency,
}

impl LoanProduct {
    /// Build loan terms for an application under this product, enforcing the
    /// product's amount and tenure limits.
    pub fn terms_for(&self, principal: Money, tenure_months: u32) -> LoanDeskResult<LoanTerms> {
        self.validate()?;

        if principal < self.min_amount || principal > self.max_amount {
            return Err(LoanDeskError::invalid(
                "principal",
                format!(
                    "{principal} is outside the {} limits of {} to {}",
                    self.name, self.min_amount, self.max_amount
                ),
            ));
        }
        if tenure_months < self.min_tenure_months || tenure_months > self.max_tenure_months {
            return Err(LoanDeskError::invalid(
                "tenure_months",
                format!(
                    "{tenure_months} months is outside the {} limits of {} to {} months",
                    self.name, self.min_tenure_months, self.max_tenure_months
                ),
            ));
        }

        Ok(LoanTerms {
            principal,
            annual_rate: self.interest_rate,
            tenure_months,
            method: self.interest_calculation,
            processing_fee_percentage: self.processing_fee_percentage,
            processing_fee_flat: self.processing_fee_flat,
        })
    }

    fn validate(&self) -> LoanDeskResult<()> {
        if self.min_amount > self.max_amount {
            return Err(LoanDeskError::invalid(
                "min_amount",
                format!("product {} has min_amount above max_amount", self.name),
            ));
        }
        if self.min_tenure_months > self.max_tenure_months {
            return Err(LoanDeskError::invalid(
                "min_tenure_months",
                format!("product {} has min tenure above max tenure", self.name),
            ));
        }
        Ok(())
    }
}

/// Find a product by name, ignoring case.
pub fn find_product<'a>(catalog: &'a [LoanProduct], name: &str) -> LoanDeskResult<&'a LoanProduct> {
    catalog
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| LoanDeskError::invalid("product", format!("no loan product named '{name}'")))
}

/// A loan application against a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    pub product: LoanProduct,
    pub principal: Money,
    pub tenure_months: u32,
    pub application_date: NaiveDate,
}

/// Figures recorded on a new loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuote {
    pub product: String,
    pub principal: Money,
    pub tenure_months: u32,
    pub amortization: AmortizationResult,
    /// Principal less the processing fee.
    pub net_disbursement: Money,
    pub application_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub repayment_frequency: RepaymentFrequency,
}

/// Quote a loan application.
pub fn quote_loan(application: &LoanApplication) -> LoanDeskResult<ComputationOutput<LoanQuote>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let product = &application.product;
    let terms = product.terms_for(application.principal, application.tenure_months)?;
    let amortization = compute_amortization(&terms)?;

    tracing::debug!(product = %product.name, principal = %terms.principal, "quoting loan");

    let net_disbursement = terms.principal - amortization.processing_fee;
    if net_disbursement <= Decimal::ZERO {
        warnings.push(format!(
            "Processing fee {} leaves nothing to disburse on principal {}",
            amortization.processing_fee, terms.principal
        ));
    }
    if product.repayment_frequency != RepaymentFrequency::Monthly {
        warnings.push(format!(
            "Installment is computed monthly; product repays {:?}",
            product.repayment_frequency
        ));
    }

    let maturity_date = add_months(application.application_date, application.tenure_months)?;

    let output = LoanQuote {
        product: product.name.clone(),
        principal: terms.principal,
        tenure_months: terms.tenure_months,
        amortization,
        net_disbursement,
        application_date: application.application_date,
        maturity_date,
        repayment_frequency: product.repayment_frequency,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Origination Quote",
        &serde_json::json!({
            "product": product.name,
            "method": product.interest_calculation.as_str(),
            "interest_rate": product.interest_rate.to_string(),
            "principal": terms.principal.to_string(),
            "tenure_months": terms.tenure_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}
