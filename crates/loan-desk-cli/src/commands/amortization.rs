use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_desk_core::amortization::calculator::{self, InterestMethod, LoanTerms};
use loan_desk_core::amortization::schedule;

use crate::input;

/// Arguments for the amortization summary
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AmortizeArgs {
    /// Path to JSON/YAML loan terms (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (12 = 12%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long, alias = "tenure-months")]
    pub tenure: Option<u32>,

    /// Interest calculation method: declining, flat or simple
    #[arg(long)]
    pub method: Option<InterestMethod>,

    /// Processing fee as a percentage of principal
    #[arg(long, default_value = "0")]
    pub fee_pct: Decimal,

    /// Flat processing fee
    #[arg(long, default_value = "0")]
    pub fee_flat: Decimal,
}

/// Arguments for the repayment schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub terms: AmortizeArgs,

    /// Date the loan starts; the first installment is due a month later (default: today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

fn loan_terms(args: &AmortizeArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    if let Some(terms) = input::read_input::<LoanTerms>(args.input.as_deref())? {
        return Ok(terms);
    }

    Ok(LoanTerms {
        principal: args.principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate: args.rate
            .ok_or("--rate is required (or provide --input)")?,
        tenure_months: args.tenure
            .ok_or("--tenure is required (or provide --input)")?,
        method: args.method
            .ok_or("--method is required (or provide --input)")?,
        processing_fee_percentage: args.fee_pct,
        processing_fee_flat: args.fee_flat,
    })
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = loan_terms(&args)?;
    tracing::debug!(?terms, "amortize");
    let result = calculator::compute_amortization(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = loan_terms(&args.terms)?;
    let start_date = args
        .start_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::debug!(?terms, %start_date, "schedule");
    let result = schedule::build_repayment_schedule(&terms, start_date)?;
    Ok(serde_json::to_value(result)?)
}
