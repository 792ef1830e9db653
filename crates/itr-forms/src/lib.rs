//! # itr-forms — Return-Type Selection and Form Generation
//!
//! The rule half of the ITR Engine: deciding which return form a taxpayer's
//! facts permit, building the form's data structure, validating it against
//! the business rules, and rendering it to portable XML and JSON documents.
//!
//! ## Shape
//!
//! - [`IncomeFacts`] / [`AdditionalInfo`] — the normalized input contracts
//!   supplied by upstream collaborators (Form-16 parsing, UI). The engine
//!   only reads them.
//! - [`select`] — the ordered-predicate eligibility selector. Exclusion
//!   rules are a declarative list evaluated in a fixed, documented order,
//!   which makes the primary rejection reason deterministic.
//! - [`build`] / [`validate`] / [`serialize`] — construct an
//!   [`ItrFormData`] variant, check it, and render it. Validation collects
//!   every violation rather than stopping at the first; generation refuses
//!   to serialize a return that failed validation.
//!
//! The form data is a tagged variant over a shared field set — validation
//! and serialization are free functions over the variant, not methods on a
//! class hierarchy.

pub mod builder;
pub mod document;
pub mod eligibility;
pub mod error;
pub mod facts;
pub mod validation;

// Re-export primary types.
pub use builder::{
    build, generate, BankDetails, CommonReturnData, FormPayload, GeneratedReturn, Itr1Payload,
    Itr2Payload, ItrFormData, TaxSummary, TdsBreakdown,
};
pub use document::{serialize, ItrDocuments, XmlElement};
pub use eligibility::{
    select, FormRecommendation, ItrSelectionResult, ItrType, ReasonCode, SelectionReason,
    ITR1_INCOME_LIMIT,
};
pub use error::FormsError;
pub use facts::{
    AdditionalInfo, CapitalGainEntry, EmployerTds, ForeignAssetDetail, HousePropertyDetail,
    IncomeFacts, ResidencyStatus, TaxpayerCategory,
};
pub use validation::{validate, IssueCode, ValidationIssue, ValidationReport};
