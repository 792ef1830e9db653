//! # itr-compute — Tax Computation Engine
//!
//! The numeric half of the ITR Engine: progressive slab computation,
//! surcharge with marginal relief, cess, regime comparison, advance-tax
//! interest under Sections 234A/B/C, and refund/demand settlement.
//!
//! ## Determinism
//!
//! Every function in this crate is pure: identical inputs (income,
//! configuration tables, dates) always produce identical outputs. There is
//! no internal mutable state, no clock access, and no I/O. This property is
//! what makes computations audit-reproducible and safe to call from any
//! threading model.
//!
//! ## Rounding
//!
//! Intermediate amounts (per-slab tax, pre-cess aggregates) are full-
//! precision decimals; rounding to whole rupees happens once per final
//! total, half away from zero. See `itr_core::money`.

pub mod calculator;
pub mod error;
pub mod penalty;
pub mod regime;
pub mod settlement;

// Re-export primary types.
pub use calculator::{compute, SlabComputation, TaxCalculationResult};
pub use error::ComputeError;
pub use penalty::{compute_interest, AdvanceTaxPenalty, PenaltyInputs, QuarterlyShortfall};
pub use regime::{compare, RegimeComparisonResult};
pub use settlement::{resolve, RefundOrDemand};
