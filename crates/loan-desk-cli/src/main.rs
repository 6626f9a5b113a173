mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{AmortizeArgs, ScheduleArgs};
use commands::origination::QuoteArgs;
use commands::payments::{AllocateArgs, BalanceArgs};

/// Loan amortization, repayment scheduling and payment allocation
#[derive(Parser)]
#[command(
    name = "loandesk",
    version,
    about = "Loan amortization, repayment scheduling and payment allocation",
    long_about = "A CLI for the arithmetic behind a loan back office, with decimal \
                  precision. Computes installments under declining, flat and simple \
                  interest, builds repayment schedules, quotes applications against \
                  loan products and splits payments between principal and interest."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute installment, total interest and processing fee for loan terms
    Amortize(AmortizeArgs),
    /// Build the month-by-month repayment schedule
    Schedule(ScheduleArgs),
    /// Quote a loan application against a product from a catalog
    Quote(QuoteArgs),
    /// Split a payment between principal and interest
    Allocate(AllocateArgs),
    /// Summarize paid and outstanding balances of a loan
    Balance(BalanceArgs),
    /// Preview the balances that would result from recording a payment
    PreviewPayment(AllocateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::amortization::run_amortize(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Quote(args) => commands::origination::run_quote(args),
        Commands::Allocate(args) => commands::payments::run_allocate(args),
        Commands::Balance(args) => commands::payments::run_balance(args),
        Commands::PreviewPayment(args) => commands::payments::run_preview_payment(args),
        Commands::Version => {
            println!("loandesk {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
