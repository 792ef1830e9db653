//! # Configuration Errors
//!
//! Structural defects in statutory tables are construction-time errors: a
//! slab table with a gap between brackets or a capped top bracket is
//! rejected before any computation can read it. Lookup of an unconfigured
//! financial year is the only error a correctly-deployed engine can see at
//! runtime.

use thiserror::Error;

/// Errors raised by configuration construction and lookup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration is registered for the requested financial year.
    /// Fatal for the request; surfaced to the caller unchanged.
    #[error("no tax configuration for financial year \"{0}\"")]
    ConfigurationNotFound(String),

    /// A slab table must contain at least one bracket.
    #[error("slab table is empty")]
    EmptySlabTable,

    /// The first bracket must start at zero income.
    #[error("first slab must start at 0, found {found}")]
    NonZeroFirstSlab {
        /// The offending minimum income.
        found: String,
    },

    /// A bracket's upper bound must exceed its lower bound.
    #[error("slab \"{label}\" has max {max} <= min {min}")]
    InvalidSlabBounds {
        /// Label of the offending bracket.
        label: String,
        /// Lower bound.
        min: String,
        /// Upper bound.
        max: String,
    },

    /// Brackets must tile the income line without gaps or overlaps.
    #[error("slab {index} starts at {found}, expected {expected} (brackets must be contiguous)")]
    NonContiguousSlabs {
        /// Index of the offending bracket.
        index: usize,
        /// Where the bracket should start.
        expected: String,
        /// Where it actually starts.
        found: String,
    },

    /// Only the final bracket may be open-ended, and it must be.
    #[error("slab \"{label}\" is misplaced: only the last bracket is open-ended")]
    MisplacedOpenBracket {
        /// Label of the offending bracket.
        label: String,
    },

    /// Tax rates cannot be negative.
    #[error("slab \"{label}\" has negative rate {rate}")]
    NegativeRate {
        /// Label of the offending bracket.
        label: String,
        /// The offending rate.
        rate: String,
    },

    /// Surcharge tiers must have strictly ascending thresholds and
    /// non-decreasing rates.
    #[error("surcharge tiers are not in ascending order at tier {index}")]
    UnorderedSurchargeTiers {
        /// Index of the offending tier.
        index: usize,
    },

    /// YAML parse failure while loading a configuration document.
    #[error("configuration YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
