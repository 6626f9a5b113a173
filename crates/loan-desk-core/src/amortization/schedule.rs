//! Month-by-month repayment schedule.
//!
//! The schedule reconciles to the amortization summary: principal components
//! sum to the principal, installment totals sum to `total_amount`, interest
//! components sum to `total_interest`. Rounding residue is absorbed by the
//! final installment.

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::calculator::{compute_amortization, InterestMethod, LoanTerms};
use crate::error::LoanDeskError;
use crate::time_value::monthly_rate;
use crate::types::*;
use crate::LoanDeskResult;

/// A single installment in the repayment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledInstallment {
    pub installment_number: u32,
    pub due_date: NaiveDate,
    pub opening_balance: Money,
    pub principal: Money,
    pub interest: Money,
    pub total: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    pub installments: Vec<ScheduledInstallment>,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_amount: Money,
    pub maturity_date: NaiveDate,
}

/// Collection state of a scheduled installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    Pending,
    Partial,
    Paid,
    Overdue,
}

/// Date `months` calendar months after `start`, clamped to month end
/// (31 Jan + 1 month = 28/29 Feb).
pub fn add_months(start: NaiveDate, months: u32) -> LoanDeskResult<NaiveDate> {
    start.checked_add_months(Months::new(months)).ok_or_else(|| {
        LoanDeskError::DateError(format!("{start} + {months} months is out of range"))
    })
}

/// Build the repayment schedule for `terms`, with the first installment due
/// one month after `start_date`.
pub fn build_repayment_schedule(
    terms: &LoanTerms,
    start_date: NaiveDate,
) -> LoanDeskResult<ComputationOutput<RepaymentSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let summary = compute_amortization(terms)?;
    let n = terms.tenure_months;
    // every due date falls on or before maturity
    let maturity_date = add_months(start_date, n)?;

    tracing::debug!(installments = n, %start_date, "building repayment schedule");

    let r = match terms.method {
        InterestMethod::Declining => monthly_rate(terms.annual_rate),
        InterestMethod::Flat | InterestMethod::Simple => Decimal::ZERO,
    };
    // Flat and simple loans spread interest evenly; truncation keeps the
    // final residual non-negative.
    let even_interest = (summary.total_interest / Decimal::from(n))
        .round_dp_with_strategy(MONEY_DP, RoundingStrategy::ToZero);

    let mut installments = Vec::with_capacity(n as usize);
    let mut balance = terms.principal;
    let mut billed = Decimal::ZERO;
    let mut interest_billed = Decimal::ZERO;

    for k in 1..=n {
        let opening = balance;
        let due_date = add_months(start_date, k)?;

        let (principal, interest, total) = if k < n {
            let interest = match terms.method {
                InterestMethod::Declining => round_money(opening * r),
                InterestMethod::Flat | InterestMethod::Simple => even_interest,
            };
            let principal = (summary.monthly_installment - interest)
                .max(Decimal::ZERO)
                .min(opening);
            (principal, interest, principal + interest)
        } else {
            let total = summary.total_amount - billed;
            let mut interest = total - opening;
            if interest < Decimal::ZERO {
                warnings.push(format!(
                    "Final installment interest residual {interest} clamped to zero; \
                     schedule interest differs from summary by {}",
                    -interest
                ));
                interest = Decimal::ZERO;
            }
            (opening, interest, opening + interest)
        };

        balance -= principal;
        billed += total;
        interest_billed += interest;

        installments.push(ScheduledInstallment {
            installment_number: k,
            due_date,
            opening_balance: opening,
            principal,
            interest,
            total,
            closing_balance: balance,
        });
    }

    let output = RepaymentSchedule {
        installments,
        total_principal: terms.principal - balance,
        total_interest: interest_billed,
        total_amount: billed,
        maturity_date,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Repayment Schedule",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate": terms.annual_rate.to_string(),
            "tenure_months": n,
            "method": terms.method.as_str(),
            "start_date": start_date.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Classify an installment from the amount collected against it.
pub fn classify_installment(
    scheduled_total: Money,
    paid_amount: Money,
    due_date: NaiveDate,
    as_of: NaiveDate,
) -> InstallmentStatus {
    if paid_amount >= scheduled_total {
        InstallmentStatus::Paid
    } else if as_of > due_date {
        InstallmentStatus::Overdue
    } else if paid_amount > Decimal::ZERO {
        InstallmentStatus::Partial
    } else {
        InstallmentStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn flat_terms() -> LoanTerms {
        LoanTerms {
            principal: dec!(10000),
            annual_rate: dec!(12),
            tenure_months: 12,
            method: InterestMethod::Flat,
            processing_fee_percentage: Decimal::ZERO,
            processing_fee_flat: Decimal::ZERO,
        }
    }

    #[test]
    fn test_flat_schedule_reconciles() {
        let out = build_repayment_schedule(&flat_terms(), date(2024, 1, 15)).unwrap();
        let s = &out.result;
        assert_eq!(s.installments.len(), 12);
        assert_eq!(s.total_principal, dec!(10000));
        assert_eq!(s.total_interest, dec!(1200.00));
        assert_eq!(s.total_amount, dec!(11200.00));

        // 1200 / 12 = 100 interest per month, 833.33 principal
        assert_eq!(s.installments[0].interest, dec!(100.00));
        assert_eq!(s.installments[0].principal, dec!(833.33));
        assert_eq!(s.installments[0].total, dec!(933.33));

        // Last installment absorbs the rounding: 11200 - 11 * 933.33 = 933.37
        let last = s.installments.last().unwrap();
        assert_eq!(last.total, dec!(933.37));
        assert_eq!(last.closing_balance, Decimal::ZERO);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_declining_schedule_reconciles() {
        let mut terms = flat_terms();
        terms.method = InterestMethod::Declining;
        let out = build_repayment_schedule(&terms, date(2024, 1, 15)).unwrap();
        let s = &out.result;

        // First month interest on full balance at 1%
        assert_eq!(s.installments[0].interest, dec!(100.00));
        assert_eq!(s.installments[0].principal, dec!(788.49));

        let sum_principal: Decimal = s.installments.iter().map(|i| i.principal).sum();
        let sum_interest: Decimal = s.installments.iter().map(|i| i.interest).sum();
        assert_eq!(sum_principal, dec!(10000));
        assert_eq!(sum_interest, dec!(661.85));
        assert_eq!(s.total_amount, dec!(10661.85));

        // Interest portion shrinks as the balance falls
        assert!(s.installments[5].interest < s.installments[0].interest);
    }

    #[test]
    fn test_due_dates_and_maturity() {
        let out = build_repayment_schedule(&flat_terms(), date(2024, 1, 31)).unwrap();
        let s = &out.result;
        assert_eq!(s.installments[0].due_date, date(2024, 2, 29));
        assert_eq!(s.installments[1].due_date, date(2024, 3, 31));
        assert_eq!(s.maturity_date, date(2025, 1, 31));
        assert_eq!(s.installments.last().unwrap().due_date, s.maturity_date);
    }

    #[test]
    fn test_single_month_schedule() {
        let mut terms = flat_terms();
        terms.tenure_months = 1;
        let out = build_repayment_schedule(&terms, date(2024, 6, 1)).unwrap();
        let only = &out.result.installments[0];
        assert_eq!(only.principal, dec!(10000));
        assert_eq!(only.interest, dec!(100.00));
        assert_eq!(only.total, dec!(10100.00));
    }

    #[test]
    fn test_schedule_propagates_invalid_terms() {
        let mut terms = flat_terms();
        terms.principal = dec!(-5);
        assert!(build_repayment_schedule(&terms, date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_tenure_beyond_calendar_fails_before_building() {
        let mut terms = flat_terms();
        terms.annual_rate = Decimal::ZERO;
        terms.tenure_months = u32::MAX;
        let err = build_repayment_schedule(&terms, date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, LoanDeskError::DateError(_)));
    }

    #[test]
    fn test_classify_installment() {
        let due = date(2024, 3, 1);
        assert_eq!(
            classify_installment(dec!(100), dec!(100), due, date(2024, 4, 1)),
            InstallmentStatus::Paid
        );
        assert_eq!(
            classify_installment(dec!(100), dec!(40), due, date(2024, 4, 1)),
            InstallmentStatus::Overdue
        );
        assert_eq!(
            classify_installment(dec!(100), dec!(40), due, date(2024, 3, 1)),
            InstallmentStatus::Partial
        );
        assert_eq!(
            classify_installment(dec!(100), Decimal::ZERO, due, date(2024, 2, 1)),
            InstallmentStatus::Pending
        );
    }
}
