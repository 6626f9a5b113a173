use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loan_desk_core::payments::allocation::{self, AllocationOrder, LoanBalances};
use loan_desk_core::payments::balance;

use crate::input;

/// Loan balance flags shared by the payment commands
#[derive(Args)]
pub struct BalanceFlags {
    /// Principal amount of the loan
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Principal already paid
    #[arg(long, default_value = "0")]
    pub principal_paid: Decimal,

    /// Total interest of the loan
    #[arg(long)]
    pub total_interest: Option<Decimal>,

    /// Interest already paid
    #[arg(long, default_value = "0")]
    pub interest_paid: Decimal,
}

impl BalanceFlags {
    fn balances(&self) -> Result<LoanBalances, Box<dyn std::error::Error>> {
        Ok(LoanBalances {
            principal: self.principal
                .ok_or("--principal is required (or provide --input)")?,
            principal_paid: self.principal_paid,
            total_interest: self.total_interest
                .ok_or("--total-interest is required (or provide --input)")?,
            interest_paid: self.interest_paid,
        })
    }
}

/// Arguments for allocating or previewing a payment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AllocateArgs {
    /// Path to a JSON/YAML payment request: {payment, balances, order?}
    #[arg(long)]
    pub input: Option<String>,

    /// Payment amount
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Allocation order: principal-first or interest-first
    #[arg(long, default_value = "principal-first")]
    pub order: AllocationOrder,

    #[command(flatten)]
    pub balances: BalanceFlags,
}

/// Arguments for the balance summary
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BalanceArgs {
    /// Path to JSON/YAML loan balances
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub balances: BalanceFlags,
}

#[derive(Deserialize)]
struct PaymentRequest {
    payment: Decimal,
    balances: LoanBalances,
    #[serde(default)]
    order: AllocationOrder,
}

fn payment_request(args: &AllocateArgs) -> Result<PaymentRequest, Box<dyn std::error::Error>> {
    if let Some(request) = input::read_input::<PaymentRequest>(args.input.as_deref())? {
        return Ok(request);
    }

    Ok(PaymentRequest {
        payment: args.payment
            .ok_or("--payment is required (or provide --input)")?,
        balances: args.balances.balances()?,
        order: args.order,
    })
}

pub fn run_allocate(args: AllocateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = payment_request(&args)?;
    let result = allocation::allocate_payment_with_order(request.payment, &request.balances, request.order)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_preview_payment(args: AllocateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = payment_request(&args)?;
    let result = balance::preview_payment(request.payment, &request.balances, request.order)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_balance(args: BalanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let balances = match input::read_input::<LoanBalances>(args.input.as_deref())? {
        Some(balances) => balances,
        None => args.balances.balances()?,
    };
    let result = balance::summarize_balances(&balances)?;
    Ok(serde_json::to_value(result)?)
}
