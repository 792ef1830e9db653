//! # Progressive Slab Tables
//!
//! A [`TaxSlab`] is one progressive bracket; a [`SlabTable`] is an ordered,
//! validated sequence of brackets covering `[0, ∞)`.
//!
//! ## Invariants
//!
//! Enforced at construction (and therefore on deserialization):
//!
//! - the first bracket starts at 0;
//! - every bracket's upper bound exceeds its lower bound;
//! - bracket `i+1` starts exactly where bracket `i` ends;
//! - only the last bracket is open-ended, and it must be;
//! - rates are non-negative.
//!
//! A `SlabTable` that exists is therefore safe to fold over without bounds
//! checks in the calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One progressive tax bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Lower bound of the bracket (inclusive).
    pub min_income: Decimal,
    /// Upper bound of the bracket (exclusive). `None` for the open-ended
    /// top bracket.
    pub max_income: Option<Decimal>,
    /// Tax rate applied to income inside this bracket, in percent.
    pub rate_percent: Decimal,
    /// Human-readable bracket label (e.g. "₹3,00,001 – ₹6,00,000 @ 5%").
    pub label: String,
}

impl TaxSlab {
    /// Width of the bracket, `None` for the open-ended top bracket.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }
}

/// An ordered, validated sequence of brackets covering `[0, ∞)`.
///
/// Serialized as a plain array of brackets; deserialization re-validates,
/// so a YAML table with a gap or a capped top bracket is rejected at load
/// time, not at computation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxSlab>", into = "Vec<TaxSlab>")]
pub struct SlabTable(Vec<TaxSlab>);

impl SlabTable {
    /// Build a slab table, enforcing the bracket invariants.
    ///
    /// # Errors
    ///
    /// Returns the first structural defect found, in bracket order; see
    /// [`ConfigError`] for the variants.
    pub fn new(slabs: Vec<TaxSlab>) -> Result<Self, ConfigError> {
        let first = match slabs.first() {
            Some(s) => s,
            None => return Err(ConfigError::EmptySlabTable),
        };
        if first.min_income != Decimal::ZERO {
            return Err(ConfigError::NonZeroFirstSlab {
                found: first.min_income.to_string(),
            });
        }

        let last_index = slabs.len() - 1;
        let mut expected_min = Decimal::ZERO;
        for (index, slab) in slabs.iter().enumerate() {
            if slab.rate_percent < Decimal::ZERO {
                return Err(ConfigError::NegativeRate {
                    label: slab.label.clone(),
                    rate: slab.rate_percent.to_string(),
                });
            }
            if slab.min_income != expected_min {
                return Err(ConfigError::NonContiguousSlabs {
                    index,
                    expected: expected_min.to_string(),
                    found: slab.min_income.to_string(),
                });
            }
            match slab.max_income {
                Some(max) => {
                    if index == last_index {
                        // Top bracket must be open-ended.
                        return Err(ConfigError::MisplacedOpenBracket {
                            label: slab.label.clone(),
                        });
                    }
                    if max <= slab.min_income {
                        return Err(ConfigError::InvalidSlabBounds {
                            label: slab.label.clone(),
                            min: slab.min_income.to_string(),
                            max: max.to_string(),
                        });
                    }
                    expected_min = max;
                }
                None => {
                    if index != last_index {
                        return Err(ConfigError::MisplacedOpenBracket {
                            label: slab.label.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self(slabs))
    }

    /// The brackets, in ascending order.
    pub fn slabs(&self) -> &[TaxSlab] {
        &self.0
    }

    /// Number of brackets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A validated table is never empty; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The basic exemption limit: upper bound of the zero-entry bracket.
    ///
    /// By invariant the first bracket starts at 0; its upper bound is the
    /// income level where tax first accrues (assuming the conventional
    /// zero-rate first bracket).
    pub fn basic_exemption_limit(&self) -> Decimal {
        self.0
            .first()
            .and_then(|s| s.max_income)
            .unwrap_or(Decimal::ZERO)
    }
}

impl TryFrom<Vec<TaxSlab>> for SlabTable {
    type Error = ConfigError;

    fn try_from(slabs: Vec<TaxSlab>) -> Result<Self, Self::Error> {
        Self::new(slabs)
    }
}

impl From<SlabTable> for Vec<TaxSlab> {
    fn from(table: SlabTable) -> Self {
        table.0
    }
}

/// Shorthand for building a bracket in table-definition code.
pub(crate) fn slab(
    min: Decimal,
    max: Option<Decimal>,
    rate: Decimal,
    label: &str,
) -> TaxSlab {
    TaxSlab {
        min_income: min,
        max_income: max,
        rate_percent: rate,
        label: label.to_string(),
    }
}
