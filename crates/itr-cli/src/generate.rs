//! # Generate Subcommand
//!
//! Builds, validates, and serializes a return. The form type comes from
//! the eligibility selector unless forced with `--form`; a `NotSupported`
//! verdict or a validation failure is a business failure (exit 1), printed
//! as structured JSON rather than a stack trace.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use itr_config::TaxConfigRegistry;
use itr_forms::{AdditionalInfo, FormsError, IncomeFacts, ItrType};

use crate::{print_json, read_json};

/// Form type forced on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormArg {
    /// ITR-1 (Sahaj).
    Itr1,
    /// ITR-2.
    Itr2,
}

impl From<FormArg> for ItrType {
    fn from(arg: FormArg) -> Self {
        match arg {
            FormArg::Itr1 => ItrType::Itr1,
            FormArg::Itr2 => ItrType::Itr2,
        }
    }
}

/// Output document selection.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// XML document only.
    Xml,
    /// JSON document only.
    Json,
    /// Both documents, wrapped in one JSON object.
    Both,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Xml => "xml",
            Self::Json => "json",
            Self::Both => "both",
        })
    }
}

/// Arguments for `itr generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to a JSON document with the normalized income facts.
    #[arg(long)]
    pub facts: PathBuf,

    /// Path to a JSON document with identity, bank, and payment details.
    #[arg(long)]
    pub info: PathBuf,

    /// Force a form type instead of using the eligibility selector.
    #[arg(long, value_enum)]
    pub form: Option<FormArg>,

    /// Which rendering to print.
    #[arg(long, value_enum, default_value_t = OutputFormat::Both)]
    pub format: OutputFormat,
}

/// Execute the generate subcommand.
pub fn run(args: &GenerateArgs, registry: &TaxConfigRegistry) -> Result<u8> {
    let facts: IncomeFacts = read_json(&args.facts)?;
    let info: AdditionalInfo = read_json(&args.info)?;

    let form_type = match args.form {
        Some(forced) => forced.into(),
        None => {
            let selection = itr_forms::select(&facts);
            match selection.recommended.form() {
                Some(form) => {
                    tracing::info!(form = %form, "eligibility selector chose the form");
                    form
                }
                None => {
                    let err = FormsError::UnsupportedItrType {
                        reason: selection.explanation.clone(),
                    };
                    eprintln!("{err}");
                    print_json(&selection)?;
                    return Ok(1);
                }
            }
        }
    };

    match itr_forms::generate(registry, &facts, &info, form_type) {
        Ok(generated) => {
            match args.format {
                OutputFormat::Xml => println!("{}", generated.documents.xml),
                OutputFormat::Json => print_json(&generated.documents.json)?,
                OutputFormat::Both => print_json(&generated.documents)?,
            }
            Ok(0)
        }
        Err(FormsError::ValidationFailed { report }) => {
            eprintln!("return validation failed; no document generated");
            print_json(&report)?;
            Ok(1)
        }
        Err(other) => Err(other.into()),
    }
}
