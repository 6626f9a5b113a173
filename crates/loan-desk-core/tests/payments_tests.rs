use loan_desk_core::payments::allocation::{
    allocate_payment, allocate_payment_with_order, AllocationOrder, LoanBalances,
};
use loan_desk_core::payments::balance::{preview_payment, summarize_balances};
use loan_desk_core::LoanDeskError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn balances(principal: Decimal, principal_paid: Decimal, interest: Decimal, interest_paid: Decimal) -> LoanBalances {
    LoanBalances {
        principal,
        principal_paid,
        total_interest: interest,
        interest_paid,
    }
}

// ===========================================================================
// Allocation
// ===========================================================================

#[test]
fn test_new_loan_payment_goes_to_principal() {
    let b = balances(dec!(10000), dec!(0), dec!(1200), dec!(0));
    let a = allocate_payment(dec!(500), &b).unwrap();
    assert_eq!(a.principal_paid, dec!(500.00));
    assert_eq!(a.interest_paid, dec!(0.00));
}

#[test]
fn test_payment_spills_into_interest_once_principal_cleared() {
    let b = balances(dec!(10000), dec!(9900), dec!(1200), dec!(0));
    let a = allocate_payment(dec!(500), &b).unwrap();
    assert_eq!(a.principal_paid, dec!(100.00));
    assert_eq!(a.interest_paid, dec!(400.00));
}

#[test]
fn test_overpayment_excess_unallocated() {
    let b = balances(dec!(10000), dec!(9900), dec!(1200), dec!(1000));
    let remaining = b.principal_remaining() + b.interest_remaining();
    let a = allocate_payment(dec!(1000), &b).unwrap();
    assert_eq!(a.total(), remaining);
    assert!(a.total() < dec!(1000));
}

#[test]
fn test_allocate_payment_is_principal_first_order() {
    let b = balances(dec!(800), dec!(200), dec!(90), dec!(10));
    assert_eq!(
        allocate_payment(dec!(650), &b).unwrap(),
        allocate_payment_with_order(dec!(650), &b, AllocationOrder::PrincipalFirst).unwrap()
    );
}

#[test]
fn test_negative_balance_rejected() {
    let b = balances(dec!(-1), dec!(0), dec!(0), dec!(0));
    assert!(matches!(
        allocate_payment(dec!(10), &b),
        Err(LoanDeskError::InvalidInput { .. })
    ));
}

// ===========================================================================
// Balances and preview
// ===========================================================================

#[test]
fn test_outstanding_balance_is_total_minus_paid() {
    let b = balances(dec!(10000), dec!(4000), dec!(1200), dec!(200));
    let s = summarize_balances(&b).unwrap();
    assert_eq!(s.total_amount, dec!(11200));
    assert_eq!(s.total_paid, dec!(4200));
    assert_eq!(s.outstanding_balance, dec!(7000));
}

#[test]
fn test_preview_of_final_payment() {
    let b = balances(dec!(10000), dec!(9500), dec!(1200), dec!(1100));
    let out = preview_payment(dec!(600), &b, AllocationOrder::PrincipalFirst).unwrap();
    assert_eq!(out.result.unallocated, Decimal::ZERO);
    assert_eq!(out.result.outstanding_after, Decimal::ZERO);
    assert!(out.result.balances_after.is_fully_paid);
    assert!(out.warnings.is_empty());
    assert_eq!(out.methodology, "Payment Allocation Preview");
}

#[test]
fn test_preview_on_settled_loan_warns() {
    let b = balances(dec!(1000), dec!(1000), dec!(100), dec!(100));
    let out = preview_payment(dec!(50), &b, AllocationOrder::InterestFirst).unwrap();
    assert_eq!(out.result.allocation.total(), Decimal::ZERO);
    assert_eq!(out.result.unallocated, dec!(50));
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_balances_too_large_to_total_are_rejected() {
    let huge = dec!(60000000000000000000000000000);
    let b = balances(huge, dec!(0), huge, dec!(0));
    match summarize_balances(&b) {
        Err(LoanDeskError::InvalidInput { field, .. }) => assert_eq!(field, "total_interest"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
    // allocation alone never sums the two balances
    assert!(allocate_payment(dec!(100), &b).is_ok());
    assert!(preview_payment(dec!(100), &b, AllocationOrder::PrincipalFirst).is_err());
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(128))]

    #[test]
    fn prop_allocation_respects_caps(
        payment_cents in 1i64..5_000_000,
        principal_cents in 0i64..5_000_000,
        principal_paid_pct in 0i64..=100,
        interest_cents in 0i64..1_000_000,
        interest_paid_pct in 0i64..=100,
        interest_first in any::<bool>(),
    ) {
        let principal = Decimal::new(principal_cents, 2);
        let interest = Decimal::new(interest_cents, 2);
        let b = balances(
            principal,
            principal * Decimal::from(principal_paid_pct) / dec!(100),
            interest,
            interest * Decimal::from(interest_paid_pct) / dec!(100),
        );
        let payment = Decimal::new(payment_cents, 2);
        let order = if interest_first { AllocationOrder::InterestFirst } else { AllocationOrder::PrincipalFirst };
        let a = allocate_payment_with_order(payment, &b, order).unwrap();

        prop_assert!(a.principal_paid >= Decimal::ZERO && a.interest_paid >= Decimal::ZERO);
        prop_assert!(a.principal_paid <= b.principal_remaining());
        prop_assert!(a.interest_paid <= b.interest_remaining());
        prop_assert!(a.total() <= payment);

        let remaining = b.principal_remaining() + b.interest_remaining();
        if payment <= remaining {
            prop_assert_eq!(a.total(), payment);
        } else {
            prop_assert_eq!(a.total(), remaining);
        }
    }
}
