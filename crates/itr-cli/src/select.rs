//! # Select Subcommand
//!
//! Return-type selection with the full reasoning trail.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use itr_forms::{FormRecommendation, IncomeFacts};

use crate::{print_json, read_json};

/// Arguments for `itr select`.
#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Path to a JSON document with the normalized income facts.
    #[arg(long)]
    pub facts: PathBuf,
}

/// Execute the select subcommand.
///
/// Exit code 1 when neither supported form fits — the verdict still
/// prints, but scripts get a failure signal.
pub fn run(args: &SelectArgs) -> Result<u8> {
    let facts: IncomeFacts = read_json(&args.facts)?;
    let result = itr_forms::select(&facts);
    print_json(&result)?;
    if result.recommended == FormRecommendation::NotSupported {
        return Ok(1);
    }
    Ok(0)
}
