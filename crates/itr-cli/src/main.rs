//! # itr CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;

use clap::Parser;

use itr_cli::{compare, compute, generate, interest, select};

/// ITR Engine CLI — Indian income-tax computation and return generation.
///
/// Computes slab tax, compares regimes, charges advance-tax interest,
/// selects the applicable return form, and generates validated ITR
/// documents.
#[derive(Parser, Debug)]
#[command(name = "itr", version, about)]
struct Cli {
    /// Additional tax-configuration YAML documents to load (repeatable).
    #[arg(long, global = true)]
    config: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Slab tax computation for a taxable income.
    Compute(compute::ComputeArgs),
    /// Old-versus-new regime comparison.
    Compare(compare::CompareArgs),
    /// Advance-tax interest under Sections 234A/B/C.
    Interest(interest::InterestArgs),
    /// Return-type selection with reasons.
    Select(select::SelectArgs),
    /// Build, validate, and serialize a return.
    Generate(generate::GenerateArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };
    std::process::exit(i32::from(exit_code));
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let registry = itr_cli::load_registry(&cli.config)?;

    match &cli.command {
        Commands::Compute(args) => compute::run(args, &registry),
        Commands::Compare(args) => compare::run(args, &registry),
        Commands::Interest(args) => interest::run(args),
        Commands::Select(args) => select::run(args),
        Commands::Generate(args) => generate::run(args, &registry),
    }
}
