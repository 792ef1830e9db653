//! # Interest Subcommand
//!
//! Advance-tax interest under Sections 234A/B/C from a JSON input
//! document.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use itr_compute::PenaltyInputs;

use crate::{print_json, read_json};

/// Arguments for `itr interest`.
#[derive(Args, Debug)]
pub struct InterestArgs {
    /// Path to a JSON document with the interest inputs (liability, TDS
    /// credit, quarterly advance tax, financial year, filing date).
    #[arg(long)]
    pub facts: PathBuf,
}

/// Execute the interest subcommand.
pub fn run(args: &InterestArgs) -> Result<u8> {
    let inputs: PenaltyInputs = read_json(&args.facts)?;
    let penalty = itr_compute::compute_interest(&inputs);
    print_json(&penalty)?;
    Ok(0)
}
