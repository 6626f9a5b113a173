#![cfg(feature = "origination")]

use chrono::NaiveDate;
use loan_desk_core::amortization::calculator::InterestMethod;
use loan_desk_core::amortization::schedule::build_repayment_schedule;
use loan_desk_core::origination::{find_product, quote_loan, LoanApplication, LoanProduct, RepaymentFrequency};
use loan_desk_core::LoanDeskError;
use rust_decimal_macros::dec;

fn catalog() -> Vec<LoanProduct> {
    serde_json::from_str(
        r#"[
            {
                "name": "Micro Business",
                "interest_rate": "24",
                "interest_calculation": "declining",
                "processing_fee_percentage": "1.5",
                "processing_fee_flat": "50",
                "min_amount": "5000",
                "max_amount": "100000",
                "min_tenure_months": 6,
                "max_tenure_months": 36
            },
            {
                "name": "Emergency",
                "interest_rate": "36",
                "interest_calculation": "flat",
                "min_amount": "1000",
                "max_amount": "10000",
                "min_tenure_months": 1,
                "max_tenure_months": 6,
                "repayment_frequency": "weekly"
            }
        ]"#,
    )
    .unwrap()
}

fn application(product: &str, principal: rust_decimal::Decimal, tenure: u32) -> LoanApplication {
    LoanApplication {
        product: find_product(&catalog(), product).unwrap().clone(),
        principal,
        tenure_months: tenure,
        application_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
    }
}

#[test]
fn test_quote_declining_product() {
    let out = quote_loan(&application("micro business", dec!(20000), 12)).unwrap();
    let q = &out.result;
    // 20,000 * 1.5% + 50
    assert_eq!(q.amortization.processing_fee, dec!(350.00));
    assert_eq!(q.net_disbursement, dec!(19650.00));
    assert_eq!(q.amortization.interest_rate, dec!(24));
    assert_eq!(q.maturity_date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    assert_eq!(
        q.amortization.total_amount,
        q.principal + q.amortization.total_interest
    );
}

#[test]
fn test_quote_agrees_with_schedule_maturity() {
    let app = application("Micro Business", dec!(20000), 18);
    let quote = quote_loan(&app).unwrap().result;
    let terms = app.product.terms_for(app.principal, app.tenure_months).unwrap();
    let schedule = build_repayment_schedule(&terms, app.application_date).unwrap().result;
    assert_eq!(schedule.maturity_date, quote.maturity_date);
    assert_eq!(schedule.total_amount, quote.amortization.total_amount);
}

#[test]
fn test_non_monthly_product_warns() {
    let out = quote_loan(&application("Emergency", dec!(5000), 3)).unwrap();
    assert_eq!(out.result.repayment_frequency, RepaymentFrequency::Weekly);
    assert_eq!(out.warnings.len(), 1);
    // 5,000 * 36% * 3 / 1200
    assert_eq!(out.result.amortization.total_interest, dec!(450.00));
}

#[test]
fn test_tenure_above_product_limit() {
    let err = quote_loan(&application("Emergency", dec!(5000), 12)).unwrap_err();
    assert!(matches!(err, LoanDeskError::InvalidInput { ref field, .. } if field == "tenure_months"));
}

#[test]
fn test_product_method_parsed() {
    let products = catalog();
    assert_eq!(products[0].interest_calculation, InterestMethod::Declining);
    assert_eq!(products[1].processing_fee_flat, dec!(0));
}
