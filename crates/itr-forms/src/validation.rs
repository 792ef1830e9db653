//! # Return Validation
//!
//! Business-rule checks on a built return, run before serialization. The
//! checks collect every violation into a [`ValidationReport`] rather than
//! stopping at the first — a filer fixing a return wants the whole list.
//!
//! ## Rules
//!
//! 1. PAN is well-formed (ten characters, `AAAAA9999A`).
//! 2. Name is non-empty.
//! 3. Declared total income fits the selected form's limit (ITR-1 ≤ ₹50L).
//! 4. Deductor TANs are well-formed on the salary-only form (ITR-1).
//! 5. Quarterly TDS figures reconcile with the declared annual TDS within
//!    ±₹1 ([`TDS_RECONCILIATION_TOLERANCE`]), absorbing rounding.
//! 6. Bank account and a well-formed IFSC are present whenever a refund is
//!    due.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use itr_core::{Ifsc, Pan, Tan};

use crate::builder::{FormPayload, ItrFormData};
use crate::eligibility::{ItrType, ITR1_INCOME_LIMIT};

/// Permitted absolute difference between the quarterly TDS sum and the
/// declared annual TDS, in rupees. Absorbs per-quarter rounding.
pub const TDS_RECONCILIATION_TOLERANCE: Decimal = Decimal::ONE;

/// Stable identifiers for validation rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// PAN is not of the `AAAAA9999A` shape.
    MalformedPan,
    /// Taxpayer name is empty.
    EmptyName,
    /// Declared income exceeds the selected form's limit.
    IncomeExceedsFormLimit,
    /// A deductor TAN is missing or malformed on a salary-only form.
    MalformedTan,
    /// Quarterly TDS does not reconcile with the declared annual TDS.
    TdsMismatch,
    /// A refund is due but bank account details are missing.
    MissingBankDetailsForRefund,
    /// A refund is due but the IFSC is malformed.
    MalformedIfsc,
}

impl IssueCode {
    /// Return the string representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedPan => "malformed_pan",
            Self::EmptyName => "empty_name",
            Self::IncomeExceedsFormLimit => "income_exceeds_form_limit",
            Self::MalformedTan => "malformed_tan",
            Self::TdsMismatch => "tds_mismatch",
            Self::MissingBankDetailsForRefund => "missing_bank_details_for_refund",
            Self::MalformedIfsc => "malformed_ifsc",
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable issue code.
    pub code: IssueCode,
    /// Human-readable description with the offending values.
    pub message: String,
}

/// Result of validating a built return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the return passed every rule.
    pub is_valid: bool,
    /// Violations, in rule order.
    pub issues: Vec<ValidationIssue>,
    /// Non-fatal observations (do not affect validity).
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a passing report.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a violation. Marks the report invalid.
    pub fn add_issue(&mut self, code: IssueCode, message: String) {
        self.is_valid = false;
        self.issues.push(ValidationIssue { code, message });
    }

    /// Record a non-fatal observation.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid {
            return f.write_str("valid");
        }
        let codes: Vec<&str> = self.issues.iter().map(|i| i.code.as_str()).collect();
        write!(f, "{} issue(s): {}", self.issues.len(), codes.join(", "))
    }
}

/// Validate a built return against the business rules.
///
/// Pure check over the data; never fails, never mutates. Serialization
/// must only run on a report with `is_valid == true` — `generate`
/// enforces that.
pub fn validate(data: &ItrFormData) -> ValidationReport {
    let mut report = ValidationReport::ok();

    if Pan::new(data.common.pan.clone()).is_err() {
        report.add_issue(
            IssueCode::MalformedPan,
            format!("PAN \"{}\" is not of the form AAAAA9999A", data.common.pan),
        );
    }

    if data.common.name.trim().is_empty() {
        report.add_issue(IssueCode::EmptyName, "taxpayer name is empty".to_string());
    }

    if data.form_type == ItrType::Itr1 && data.summary.gross_total_income > ITR1_INCOME_LIMIT {
        report.add_issue(
            IssueCode::IncomeExceedsFormLimit,
            format!(
                "gross total income {} exceeds the ITR-1 limit {}",
                data.summary.gross_total_income, ITR1_INCOME_LIMIT
            ),
        );
    }

    // TAN format is enforced on the salary-only form, where TDS credit
    // rests entirely on employer certificates.
    if let FormPayload::Itr1(ref payload) = data.payload {
        if let Some(ref employer) = payload.employer {
            if Tan::new(employer.tan.clone()).is_err() {
                report.add_issue(
                    IssueCode::MalformedTan,
                    format!(
                        "employer \"{}\" TAN \"{}\" is not of the form AAAA99999A",
                        employer.employer_name, employer.tan
                    ),
                );
            }
        }
    }

    let quarterly_total = data.summary.tds.quarterly_total;
    let declared = data.summary.tds.annual_declared;
    let gap = (quarterly_total - declared).abs();
    if gap > TDS_RECONCILIATION_TOLERANCE {
        report.add_issue(
            IssueCode::TdsMismatch,
            format!(
                "quarterly TDS {} differs from declared annual TDS {} by {} \
                 (tolerance {})",
                quarterly_total, declared, gap, TDS_RECONCILIATION_TOLERANCE
            ),
        );
    }

    if data.summary.settlement.is_refund {
        if data.common.bank.account_number.trim().is_empty() {
            report.add_issue(
                IssueCode::MissingBankDetailsForRefund,
                format!(
                    "a refund of {} is due but no bank account is on record",
                    data.summary.settlement.refund_amount
                ),
            );
        }
        if Ifsc::new(data.common.bank.ifsc.clone()).is_err() {
            report.add_issue(
                IssueCode::MalformedIfsc,
                format!(
                    "a refund is due but IFSC \"{}\" is not of the form AAAA0XXXXXX",
                    data.common.bank.ifsc
                ),
            );
        }
    }

    report
}

// Tests exercising `validate` against fully-built returns live in
// `builder.rs` and the integration-tests crate, next to the builder
// fixtures they share.
