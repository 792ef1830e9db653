//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the identifiers that appear on an income-tax
//! return. Each identifier is a distinct type — you cannot pass a [`Tan`]
//! where a [`Pan`] is expected.
//!
//! ## Validation
//!
//! All three types validate format at construction time and normalize input
//! to upper case. Validation is structural (character classes and length);
//! the engine does not verify checksums or registry membership — that is the
//! tax department's job, not the return builder's.
//!
//! - PAN: Permanent Account Number, `AAAAA9999A` (10 characters)
//! - TAN: Tax Deduction Account Number, `AAAA99999A` (10 characters)
//! - IFSC: Indian Financial System Code, `AAAA0XXXXXX` (11 characters)

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Permanent Account Number — the taxpayer's identity on every return.
///
/// Format: 5 letters, 4 digits, 1 letter (e.g. `ABCPE1234F`). The fourth
/// character encodes the holder category (P for person, H for HUF, C for
/// company, …); the engine validates shape only and leaves category
/// semantics to [`IncomeFacts`]-level checks.
///
/// [`IncomeFacts`]: https://docs.rs/itr-forms
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pan(String);

impl Pan {
    /// Create a PAN from a string, validating format.
    ///
    /// Input is upper-cased before validation, so `abcpe1234f` is accepted
    /// and stored as `ABCPE1234F`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPan`] if the string is not
    /// 5 letters + 4 digits + 1 letter.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into().trim().to_ascii_uppercase();
        if !is_pan_shape(&s) {
            return Err(ValidationError::InvalidPan(s));
        }
        Ok(Self(s))
    }

    /// Access the PAN string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The holder-category character (4th position, e.g. `P` for person).
    pub fn holder_category(&self) -> char {
        // Safe by construction: validated to exactly 10 ASCII characters.
        self.0.as_bytes()[3] as char
    }
}

impl std::fmt::Display for Pan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_pan_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[..5].iter().all(|c| c.is_ascii_uppercase())
        && b[5..9].iter().all(|c| c.is_ascii_digit())
        && b[9].is_ascii_uppercase()
}

/// Tax Deduction Account Number — identifies the deductor (employer, bank)
/// on every TDS entry.
///
/// Format: 4 letters, 5 digits, 1 letter (e.g. `DELE01234F`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tan(String);

impl Tan {
    /// Create a TAN from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTan`] if the string is not
    /// 4 letters + 5 digits + 1 letter.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into().trim().to_ascii_uppercase();
        let b = s.as_bytes();
        let valid = b.len() == 10
            && b[..4].iter().all(|c| c.is_ascii_uppercase())
            && b[4..9].iter().all(|c| c.is_ascii_digit())
            && b[9].is_ascii_uppercase();
        if !valid {
            return Err(ValidationError::InvalidTan(s));
        }
        Ok(Self(s))
    }

    /// Access the TAN string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Indian Financial System Code — identifies the bank branch receiving a
/// refund. Required on the return whenever a refund is due.
///
/// Format: 4 letters, the digit `0`, 6 alphanumerics (e.g. `HDFC0001234`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ifsc(String);

impl Ifsc {
    /// Create an IFSC from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIfsc`] if the string is not
    /// 4 letters + `0` + 6 alphanumerics.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into().trim().to_ascii_uppercase();
        let b = s.as_bytes();
        let valid = b.len() == 11
            && b[..4].iter().all(|c| c.is_ascii_uppercase())
            && b[4] == b'0'
            && b[5..].iter().all(|c| c.is_ascii_alphanumeric());
        if !valid {
            return Err(ValidationError::InvalidIfsc(s));
        }
        Ok(Self(s))
    }

    /// Access the IFSC string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four-letter bank code prefix (e.g. `HDFC`).
    pub fn bank_code(&self) -> &str {
        &self.0[..4]
    }
}

impl std::fmt::Display for Ifsc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- PAN --

    #[test]
    fn pan_valid() {
        let pan = Pan::new("ABCPE1234F").unwrap();
        assert_eq!(pan.as_str(), "ABCPE1234F");
        assert_eq!(pan.holder_category(), 'P');
    }

    #[test]
    fn pan_lowercase_normalized() {
        let pan = Pan::new("abcpe1234f").unwrap();
        assert_eq!(pan.as_str(), "ABCPE1234F");
    }

    #[test]
    fn pan_whitespace_trimmed() {
        let pan = Pan::new("  ABCPE1234F ").unwrap();
        assert_eq!(pan.as_str(), "ABCPE1234F");
    }

    #[test]
    fn pan_wrong_length_rejected() {
        assert!(Pan::new("ABCPE1234").is_err());
        assert!(Pan::new("ABCPE1234FX").is_err());
        assert!(Pan::new("").is_err());
    }

    #[test]
    fn pan_wrong_character_classes_rejected() {
        assert!(Pan::new("1BCPE1234F").is_err());
        assert!(Pan::new("ABCPEX234F").is_err());
        assert!(Pan::new("ABCPE12345").is_err());
    }

    #[test]
    fn pan_serde_roundtrip() {
        let pan = Pan::new("ABCPE1234F").unwrap();
        let json = serde_json::to_string(&pan).unwrap();
        assert_eq!(json, "\"ABCPE1234F\"");
        let parsed: Pan = serde_json::from_str(&json).unwrap();
        assert_eq!(pan, parsed);
    }

    // -- TAN --

    #[test]
    fn tan_valid() {
        let tan = Tan::new("DELE01234F").unwrap();
        assert_eq!(tan.as_str(), "DELE01234F");
    }

    #[test]
    fn tan_invalid_rejected() {
        assert!(Tan::new("DELE1234F").is_err());
        assert!(Tan::new("DEL401234F").is_err());
        assert!(Tan::new("DELE01234").is_err());
    }

    // -- IFSC --

    #[test]
    fn ifsc_valid() {
        let ifsc = Ifsc::new("HDFC0001234").unwrap();
        assert_eq!(ifsc.as_str(), "HDFC0001234");
        assert_eq!(ifsc.bank_code(), "HDFC");
    }

    #[test]
    fn ifsc_fifth_char_must_be_zero() {
        assert!(Ifsc::new("HDFC1001234").is_err());
    }

    #[test]
    fn ifsc_alphanumeric_branch_allowed() {
        assert!(Ifsc::new("SBIN0RRBKGB").is_ok());
    }

    #[test]
    fn ifsc_wrong_length_rejected() {
        assert!(Ifsc::new("HDFC000123").is_err());
        assert!(Ifsc::new("HDFC00012345").is_err());
    }
}
