//! # Compare Subcommand
//!
//! Old-versus-new regime comparison with a recommendation.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use itr_config::TaxConfigRegistry;
use itr_core::FinancialYear;

use crate::print_json;

/// Arguments for `itr compare`.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Gross income in rupees, before old-regime deductions.
    #[arg(long)]
    pub income: Decimal,

    /// Deductions claimable under the old regime.
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub deductions: Decimal,

    /// Financial year, e.g. "2023-24".
    #[arg(long)]
    pub year: String,

    /// Taxpayer age in completed years.
    #[arg(long, default_value_t = 0)]
    pub age: u32,
}

/// Execute the compare subcommand.
pub fn run(args: &CompareArgs, registry: &TaxConfigRegistry) -> Result<u8> {
    let year = FinancialYear::new(args.year.clone())?;
    let result =
        itr_compute::compare(registry, args.income, args.deductions, &year, args.age)?;
    print_json(&result)?;
    tracing::info!(
        recommended = %result.recommended,
        savings = %result.tax_savings,
        "regime comparison complete"
    );
    Ok(0)
}
