//! # itr-cli — Command Handlers
//!
//! One module per subcommand, each exposing an `Args` struct and a `run`
//! function returning the process exit code: 0 on success, 1 on a
//! business-rule failure (validation errors, unsupported return type),
//! 2 on operational errors (unreadable files, malformed JSON).
//!
//! All tax logic lives in the library crates; these handlers only parse
//! arguments, read JSON documents, call the engine, and print results.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::de::DeserializeOwned;

use itr_config::{Regime, TaxConfigRegistry};

pub mod compare;
pub mod compute;
pub mod generate;
pub mod interest;
pub mod select;

/// Regime argument accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegimeArg {
    /// Old regime (deductions allowed).
    Old,
    /// New regime (Section 115BAC).
    New,
}

impl From<RegimeArg> for Regime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::Old => Regime::Old,
            RegimeArg::New => Regime::New,
        }
    }
}

impl std::fmt::Display for RegimeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Old => "old",
            Self::New => "new",
        })
    }
}

/// Build the configuration registry: built-in statutory years plus any
/// YAML documents supplied with `--config`.
pub fn load_registry(config_paths: &[std::path::PathBuf]) -> Result<TaxConfigRegistry> {
    let mut registry = TaxConfigRegistry::builtin();
    for path in config_paths {
        let document = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        registry
            .load_yaml(&document)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded tax configuration");
    }
    Ok(registry)
}

/// Read and parse a JSON input document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
