use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_desk_core::origination::{self, LoanApplication, LoanProduct};

use crate::input;

/// Arguments for quoting a loan application
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct QuoteArgs {
    /// Path to a JSON/YAML loan application (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to the loan product catalog (JSON or YAML list of products)
    #[arg(long)]
    pub catalog: Option<String>,

    /// Product name in the catalog (case-insensitive)
    #[arg(long)]
    pub product: Option<String>,

    /// Requested principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Requested tenure in months
    #[arg(long, alias = "tenure-months")]
    pub tenure: Option<u32>,

    /// Application date (default: today)
    #[arg(long)]
    pub application_date: Option<NaiveDate>,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let application = match input::read_input::<LoanApplication>(args.input.as_deref())? {
        Some(application) => application,
        None => {
            let catalog_path = args
                .catalog
                .as_deref()
                .ok_or("--catalog is required (or provide --input)")?;
            let catalog: Vec<LoanProduct> = input::file::read_structured(catalog_path)?;
            tracing::debug!(products = catalog.len(), path = catalog_path, "loaded product catalog");

            let name = args
                .product
                .as_deref()
                .ok_or("--product is required (or provide --input)")?;
            LoanApplication {
                product: origination::find_product(&catalog, name)?.clone(),
                principal: args.principal
                    .ok_or("--principal is required (or provide --input)")?,
                tenure_months: args.tenure
                    .ok_or("--tenure is required (or provide --input)")?,
                application_date: args
                    .application_date
                    .unwrap_or_else(|| chrono::Local::now().date_naive()),
            }
        }
    };

    let result = origination::quote_loan(&application)?;
    Ok(serde_json::to_value(result)?)
}
