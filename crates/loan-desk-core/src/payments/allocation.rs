//! Payment allocation between principal and interest.
//!
//! The default order is principal first: a payment reduces the outstanding
//! principal before any accrued interest is credited. Interest-first is
//! available for products that require it.
//!
//! Caller contract: any part of a payment beyond the remaining principal plus
//! remaining interest is left unallocated and is not reported in the
//! allocation. Whether an overpayment is rejected, credited or carried to a
//! later installment is decided by the caller.

use serde::{Deserialize, Serialize};

use crate::error::LoanDeskError;
use crate::types::*;
use crate::LoanDeskResult;

/// Paid and unpaid balances of a loan at the time a payment is received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanBalances {
    pub principal: Money,
    pub principal_paid: Money,
    pub total_interest: Money,
    pub interest_paid: Money,
}

impl LoanBalances {
    pub fn principal_remaining(&self) -> Money {
        self.principal - self.principal_paid
    }

    pub fn interest_remaining(&self) -> Money {
        self.total_interest - self.interest_paid
    }
}

/// Split of a payment into principal and interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAllocation {
    pub principal_paid: Money,
    pub interest_paid: Money,
}

impl PaymentAllocation {
    pub fn total(&self) -> Money {
        self.principal_paid + self.interest_paid
    }
}

/// Which balance a payment settles first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationOrder {
    #[default]
    PrincipalFirst,
    InterestFirst,
}

impl std::str::FromStr for AllocationOrder {
    type Err = LoanDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "principal_first" => Ok(AllocationOrder::PrincipalFirst),
            "interest_first" => Ok(AllocationOrder::InterestFirst),
            other => Err(LoanDeskError::invalid(
                "order",
                format!("unrecognized allocation order '{other}' (expected principal_first or interest_first)"),
            )),
        }
    }
}

/// Allocate a payment principal first.
pub fn allocate_payment(payment: Money, balances: &LoanBalances) -> LoanDeskResult<PaymentAllocation> {
    allocate_payment_with_order(payment, balances, AllocationOrder::PrincipalFirst)
}

/// Allocate a payment against the remaining balances in the given order.
pub fn allocate_payment_with_order(
    payment: Money,
    balances: &LoanBalances,
    order: AllocationOrder,
) -> LoanDeskResult<PaymentAllocation> {
    require_positive("payment", payment)?;
    validate_balances(balances)?;

    let principal_remaining = balances.principal_remaining();
    let interest_remaining = balances.interest_remaining();

    let allocation = match order {
        AllocationOrder::PrincipalFirst => {
            let principal_paid = payment.min(principal_remaining);
            let interest_paid = (payment - principal_paid).min(interest_remaining);
            PaymentAllocation {
                principal_paid,
                interest_paid,
            }
        }
        AllocationOrder::InterestFirst => {
            let interest_paid = payment.min(interest_remaining);
            let principal_paid = (payment - interest_paid).min(principal_remaining);
            PaymentAllocation {
                principal_paid,
                interest_paid,
            }
        }
    };

    tracing::debug!(
        %payment,
        principal_paid = %allocation.principal_paid,
        interest_paid = %allocation.interest_paid,
        ?order,
        "allocated payment"
    );

    Ok(allocation)
}

pub(crate) fn validate_balances(balances: &LoanBalances) -> LoanDeskResult<()> {
    require_non_negative("principal", balances.principal)?;
    require_non_negative("principal_paid", balances.principal_paid)?;
    require_non_negative("total_interest", balances.total_interest)?;
    require_non_negative("interest_paid", balances.interest_paid)?;

    if balances.principal_paid > balances.principal {
        return Err(LoanDeskError::invalid(
            "principal_paid",
            format!(
                "principal paid {} exceeds principal {}",
                balances.principal_paid, balances.principal
            ),
        ));
    }
    if balances.interest_paid > balances.total_interest {
        return Err(LoanDeskError::invalid(
            "interest_paid",
            format!(
                "interest paid {} exceeds total interest {}",
                balances.interest_paid, balances.total_interest
            ),
        ));
    }
    Ok(())
}
