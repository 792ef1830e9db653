//! # Error Types
//!
//! Validation errors for the domain primitive newtypes, built with
//! `thiserror`. Each variant carries the invalid input and the expected
//! format so that callers can diagnose malformed upstream data without
//! guesswork.
//!
//! Engine-level errors (unknown financial year, unsupported return type)
//! live in the crates that own those concerns; this crate only knows about
//! primitives.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
///
/// Identifier types enforce format constraints at construction time.
/// Deserialized values that bypass the constructor are the caller's
/// responsibility; all engine-internal construction goes through the
/// validating paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// PAN does not conform to the Income Tax Department format
    /// (10 characters: 5 letters, 4 digits, 1 letter).
    #[error("invalid PAN format: \"{0}\" (expected AAAAA9999A)")]
    InvalidPan(String),

    /// TAN does not conform to the deductor account number format
    /// (10 characters: 4 letters, 5 digits, 1 letter).
    #[error("invalid TAN format: \"{0}\" (expected AAAA99999A)")]
    InvalidTan(String),

    /// IFSC does not conform to the bank branch code format
    /// (11 characters: 4 letters, a zero, 6 alphanumerics).
    #[error("invalid IFSC format: \"{0}\" (expected AAAA0XXXXXX)")]
    InvalidIfsc(String),

    /// Financial year string is not of the form "YYYY-YY" with
    /// consecutive years.
    #[error("invalid financial year: \"{0}\" (expected YYYY-YY, e.g. \"2023-24\")")]
    InvalidFinancialYear(String),
}
