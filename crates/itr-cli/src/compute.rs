//! # Compute Subcommand
//!
//! Slab tax computation for a single taxable income, printed as the full
//! itemized result.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use itr_config::TaxConfigRegistry;
use itr_core::FinancialYear;

use crate::{print_json, RegimeArg};

/// Arguments for `itr compute`.
#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Taxable income in rupees.
    #[arg(long)]
    pub income: Decimal,

    /// Financial year, e.g. "2023-24".
    #[arg(long)]
    pub year: String,

    /// Taxation regime.
    #[arg(long, value_enum, default_value_t = RegimeArg::New)]
    pub regime: RegimeArg,

    /// Taxpayer age in completed years.
    #[arg(long, default_value_t = 0)]
    pub age: u32,
}

/// Execute the compute subcommand.
pub fn run(args: &ComputeArgs, registry: &TaxConfigRegistry) -> Result<u8> {
    let year = FinancialYear::new(args.year.clone())?;
    let result = itr_compute::compute(
        registry,
        args.income,
        &year,
        args.regime.into(),
        args.age,
    )?;
    print_json(&result)?;
    Ok(0)
}
