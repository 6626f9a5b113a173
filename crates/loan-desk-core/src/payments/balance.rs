use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::allocation::{
    allocate_payment_with_order, validate_balances, AllocationOrder, LoanBalances,
    PaymentAllocation,
};
use crate::error::LoanDeskError;
use crate::types::*;
use crate::LoanDeskResult;

/// Derived balance figures shown alongside a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub principal_remaining: Money,
    pub interest_remaining: Money,
    pub total_amount: Money,
    pub total_paid: Money,
    /// Total amount minus everything paid to date.
    pub outstanding_balance: Money,
    pub is_fully_paid: bool,
}

/// What recording a payment would do to a loan. Nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentPreview {
    pub payment: Money,
    pub order: AllocationOrder,
    pub allocation: PaymentAllocation,
    pub unallocated: Money,
    pub balances_after: BalanceSummary,
    pub outstanding_after: Money,
}

/// Summarize paid and outstanding amounts for a loan.
pub fn summarize_balances(balances: &LoanBalances) -> LoanDeskResult<BalanceSummary> {
    validate_balances(balances)?;

    let total_amount = balances
        .principal
        .checked_add(balances.total_interest)
        .ok_or_else(|| {
            LoanDeskError::invalid("total_interest", "total amount overflows decimal arithmetic")
        })?;
    // paid amounts are capped by their totals, so neither step can overflow
    let total_paid = balances.principal_paid + balances.interest_paid;
    let outstanding_balance = total_amount - total_paid;

    Ok(BalanceSummary {
        principal_remaining: balances.principal_remaining(),
        interest_remaining: balances.interest_remaining(),
        total_amount,
        total_paid,
        outstanding_balance,
        is_fully_paid: outstanding_balance.is_zero(),
    })
}

/// Preview the allocation of a payment and the balances that would result.
///
/// Overpayments are reported through `unallocated` and a warning; deciding
/// what happens to the excess stays with the caller.
pub fn preview_payment(
    payment: Money,
    balances: &LoanBalances,
    order: AllocationOrder,
) -> LoanDeskResult<ComputationOutput<PaymentPreview>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let before = summarize_balances(balances)?;
    if before.is_fully_paid {
        warnings.push("Loan is already fully paid; nothing can be allocated".into());
    }

    let allocation = allocate_payment_with_order(payment, balances, order)?;
    let unallocated = payment - allocation.total();
    if unallocated > Decimal::ZERO && !before.is_fully_paid {
        warnings.push(format!(
            "Payment {payment} exceeds outstanding balance {}; {unallocated} left unallocated",
            before.outstanding_balance
        ));
    }

    let after = LoanBalances {
        principal: balances.principal,
        principal_paid: balances.principal_paid + allocation.principal_paid,
        total_interest: balances.total_interest,
        interest_paid: balances.interest_paid + allocation.interest_paid,
    };
    let balances_after = summarize_balances(&after)?;

    let output = PaymentPreview {
        payment,
        order,
        outstanding_after: balances_after.outstanding_balance,
        allocation,
        unallocated,
        balances_after,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Payment Allocation Preview",
        &serde_json::json!({
            "payment": payment.to_string(),
            "order": order,
            "outstanding_before": before.outstanding_balance.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
