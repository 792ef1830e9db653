//! # itr-config — Statutory Tables for the ITR Engine
//!
//! Per-financial-year tax configuration: progressive slab tables for both
//! regimes and all age bands, surcharge tiers, cess rate, and the standard
//! deduction. The tables are data, not logic — the computation crates never
//! hard-code a threshold or a rate.
//!
//! ## Capabilities
//!
//! - **Validated slab tables.** [`SlabTable`] enforces the bracket
//!   invariants at construction (first bracket starts at zero, brackets are
//!   contiguous, the top bracket is open-ended). A malformed table cannot
//!   exist, whether built in code or deserialized from YAML.
//!
//! - **Built-in statutory years.** [`TaxConfigRegistry::builtin()`] ships
//!   the FY 2023-24 and FY 2024-25 tables; additional or replacement years
//!   load from YAML documents at startup.
//!
//! - **Pure lookup.** The registry is built once and read-only thereafter;
//!   lookups borrow. An unknown financial year is
//!   [`ConfigError::ConfigurationNotFound`], surfaced to the caller.

pub mod config;
pub mod error;
pub mod registry;
pub mod slab;
pub mod years;

// Re-export primary types.
pub use config::{AgeBand, AgeBandedTables, Regime, SurchargeTier, TaxConfiguration};
pub use error::ConfigError;
pub use registry::TaxConfigRegistry;
pub use slab::{SlabTable, TaxSlab};
