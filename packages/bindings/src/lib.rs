use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use loan_desk_core::amortization::{calculator, schedule};
use loan_desk_core::origination;
use loan_desk_core::payments::{allocation, balance};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_amortization(input_json: String) -> NapiResult<String> {
    let input: calculator::LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calculator::compute_amortization(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct ScheduleRequest {
    terms: calculator::LoanTerms,
    start_date: NaiveDate,
}

#[napi]
pub fn repayment_schedule(input_json: String) -> NapiResult<String> {
    let input: ScheduleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        schedule::build_repayment_schedule(&input.terms, input.start_date).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Origination
// ---------------------------------------------------------------------------

#[napi]
pub fn quote_loan(input_json: String) -> NapiResult<String> {
    let input: origination::LoanApplication =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = origination::quote_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PaymentRequest {
    payment: Decimal,
    balances: allocation::LoanBalances,
    #[serde(default)]
    order: allocation::AllocationOrder,
}

#[napi]
pub fn allocate_payment(input_json: String) -> NapiResult<String> {
    let input: PaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = allocation::allocate_payment_with_order(input.payment, &input.balances, input.order)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn summarize_balances(input_json: String) -> NapiResult<String> {
    let input: allocation::LoanBalances = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = balance::summarize_balances(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn preview_payment(input_json: String) -> NapiResult<String> {
    let input: PaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = balance::preview_payment(input.payment, &input.balances, input.order)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
