//! # Form-Layer Errors
//!
//! The builder raises only for inputs that make the output meaningless:
//! missing identity fields, an unknown financial year, an unsupported
//! return type. Business-rule violations on otherwise-wellformed data are
//! not errors — they are collected into a
//! [`ValidationReport`](crate::validation::ValidationReport) carried by
//! [`FormsError::ValidationFailed`] when generation is refused, so callers
//! see every violation, not just the first.

use thiserror::Error;

use itr_compute::ComputeError;

use crate::validation::ValidationReport;

/// Errors raised by form building and generation.
#[derive(Error, Debug)]
pub enum FormsError {
    /// A required identity field is absent; no meaningful return can be
    /// generated. Fail-fast, before any computation.
    #[error("missing required identity field: {field}")]
    MissingIdentityField {
        /// The absent field's name.
        field: &'static str,
    },

    /// The generated return failed business-rule validation; the report
    /// carries every violation.
    #[error("return validation failed: {report}")]
    ValidationFailed {
        /// The full validation report.
        report: ValidationReport,
    },

    /// The income structure requires a return type this engine does not
    /// generate (ITR-3 or later).
    #[error("unsupported return type: {reason}")]
    UnsupportedItrType {
        /// Why the supported forms do not fit.
        reason: String,
    },

    /// Tax computation failed (unknown financial year or malformed
    /// configuration).
    #[error("computation error: {0}")]
    Compute(#[from] ComputeError),
}
