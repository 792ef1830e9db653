#![deny(missing_docs)]

//! # itr-core — Foundational Types for the ITR Engine
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `thiserror`, `chrono`, and `rust_decimal` from the external
//! ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type with a validated constructor. You cannot pass a [`Tan`]
//!    where a [`Pan`] is expected, and a malformed PAN cannot be constructed.
//!
//! 2. **Decimal-only money paths.** All monetary amounts are
//!    `rust_decimal::Decimal`. Floats never enter a money computation;
//!    rounding to whole rupees happens exactly once, at the final total,
//!    via [`money::round_rupees`].
//!
//! 3. **[`FinancialYear`] as the configuration key.** Statutory constants
//!    are keyed by financial year ("2023-24"); the type validates the
//!    format and derives every statutory calendar date (advance-tax
//!    installment due dates, return filing due date) from it.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod money;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use error::ValidationError;
pub use identity::{Ifsc, Pan, Tan};
pub use money::{clamp_non_negative, percent_of, round_rupees};
pub use temporal::{charged_months, FinancialYear};
