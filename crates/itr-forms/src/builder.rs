//! # Return Data Builder
//!
//! Maps normalized income facts plus identity details into the selected
//! form's data structure. The result is a tagged variant: common fields
//! shared by every form, a computed tax summary, and a per-type payload
//! (ITR-1 carries a single employer/property; ITR-2 carries the full
//! schedules).
//!
//! Returns are built fresh per request, validated, serialized, and
//! discarded — the builder holds no state and nothing here persists.
//!
//! ## Failure Model
//!
//! - Missing identity fields fail fast ([`FormsError::MissingIdentityField`])
//!   — no computation runs on anonymous data.
//! - Business-rule violations do not fail [`build`]; they surface from
//!   [`generate`] as [`FormsError::ValidationFailed`] carrying the full
//!   report, and serialization is refused.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use itr_compute::settlement::{resolve, RefundOrDemand};
use itr_config::{Regime, TaxConfigRegistry};
use itr_core::money::clamp_non_negative;
use itr_core::FinancialYear;

use crate::document::{serialize, ItrDocuments};
use crate::eligibility::ItrType;
use crate::error::FormsError;
use crate::facts::{
    AdditionalInfo, CapitalGainEntry, EmployerTds, ForeignAssetDetail, HousePropertyDetail,
    IncomeFacts,
};
use crate::validation::validate;

/// Refund bank account details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    /// Account number.
    pub account_number: String,
    /// Branch IFSC.
    pub ifsc: String,
}

/// Fields shared by every return form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonReturnData {
    /// Fresh identifier for this generated document.
    pub document_id: Uuid,
    /// When the document was generated.
    pub generated_at: DateTime<Utc>,
    /// Financial year of the return.
    pub financial_year: FinancialYear,
    /// Assessment year label.
    pub assessment_year: String,
    /// Taxpayer PAN (validated separately; kept verbatim here).
    pub pan: String,
    /// Taxpayer full name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Refund bank details.
    pub bank: BankDetails,
    /// Elected taxation regime.
    pub regime: Regime,
}

/// TDS figures on the return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdsBreakdown {
    /// Declared annual TDS total.
    pub annual_declared: Decimal,
    /// Per-quarter TDS as reported in Form 26AS.
    pub quarterly: [Decimal; 4],
    /// Sum of the quarterly figures.
    pub quarterly_total: Decimal,
}

/// The computed money section of the return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSummary {
    /// Gross total income across the heads.
    pub gross_total_income: Decimal,
    /// Taxable income after the standard deduction against salary.
    pub taxable_income: Decimal,
    /// Total tax liability (slab tax, surcharge, cess).
    pub total_tax_liability: Decimal,
    /// Total taxes paid or credited (TDS, advance, self-assessment).
    pub total_taxes_paid: Decimal,
    /// Net refund-or-demand position.
    pub settlement: RefundOrDemand,
    /// TDS detail.
    pub tds: TdsBreakdown,
}

/// ITR-1 payload: the simplest return — at most one employer and one
/// property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itr1Payload {
    /// Income chargeable under Salaries.
    pub salary_income: Decimal,
    /// Income from the single house property.
    pub house_property_income: Decimal,
    /// Income from other sources.
    pub other_sources_income: Decimal,
    /// The single employer's TDS record, if salaried.
    pub employer: Option<EmployerTds>,
    /// The single property's detail, if owned.
    pub property: Option<HousePropertyDetail>,
}

/// ITR-2 payload: full schedules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itr2Payload {
    /// Income chargeable under Salaries.
    pub salary_income: Decimal,
    /// Net house-property income across properties.
    pub house_property_income: Decimal,
    /// Net capital gains.
    pub capital_gains_income: Decimal,
    /// Income from other sources.
    pub other_sources_income: Decimal,
    /// All employer TDS records.
    pub employers: Vec<EmployerTds>,
    /// All house properties.
    pub properties: Vec<HousePropertyDetail>,
    /// Capital-gains entries.
    pub capital_gains: Vec<CapitalGainEntry>,
    /// Foreign assets.
    pub foreign_assets: Vec<ForeignAssetDetail>,
}

/// Per-type payload of the return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum FormPayload {
    /// ITR-1 (Sahaj).
    Itr1(Itr1Payload),
    /// ITR-2.
    Itr2(Itr2Payload),
}

/// A fully-built return: common fields, computed summary, and the
/// type-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItrFormData {
    /// The form this data populates.
    pub form_type: ItrType,
    /// Shared fields.
    pub common: CommonReturnData,
    /// Computed money section.
    pub summary: TaxSummary,
    /// Type-specific payload.
    pub payload: FormPayload,
}

/// A validated, serialized return ready for the caller.
#[derive(Debug, Clone)]
pub struct GeneratedReturn {
    /// The built form data.
    pub data: ItrFormData,
    /// Rendered XML and JSON documents.
    pub documents: ItrDocuments,
}

/// Build the return data for a selected form type.
///
/// Computes the tax summary (standard deduction against salary, slab tax
/// under the elected regime, settlement against taxes paid) and shapes the
/// payload for the form. Does **not** run business-rule validation — see
/// [`generate`].
///
/// # Errors
///
/// - [`FormsError::MissingIdentityField`] when PAN or name is absent.
/// - [`FormsError::Compute`] when the financial year has no registered
///   configuration.
pub fn build(
    registry: &TaxConfigRegistry,
    facts: &IncomeFacts,
    info: &AdditionalInfo,
    form_type: ItrType,
) -> Result<ItrFormData, FormsError> {
    if info.pan.trim().is_empty() {
        return Err(FormsError::MissingIdentityField { field: "pan" });
    }
    if info.name.trim().is_empty() {
        return Err(FormsError::MissingIdentityField { field: "name" });
    }

    let config = registry
        .get(&facts.financial_year)
        .map_err(itr_compute::ComputeError::from)?;

    // Standard deduction applies against salary income only, and cannot
    // push the head below zero.
    let salary_deduction = config.standard_deduction.min(facts.salary_income);
    let gross_total_income = facts.gross_total_income();
    let taxable_income = clamp_non_negative(
        gross_total_income - clamp_non_negative(salary_deduction),
    );

    let computation = itr_compute::compute(
        registry,
        taxable_income,
        &facts.financial_year,
        info.regime,
        facts.age,
    )?;
    let total_tax_liability = computation.total_tax_with_cess;

    let total_taxes_paid = info.total_taxes_paid();
    let settlement = resolve(total_tax_liability, total_taxes_paid);

    let tds = TdsBreakdown {
        annual_declared: info.annual_tds,
        quarterly: info.quarterly_tds,
        quarterly_total: info.quarterly_tds_total(),
    };

    let summary = TaxSummary {
        gross_total_income,
        taxable_income,
        total_tax_liability,
        total_taxes_paid,
        settlement,
        tds,
    };

    let payload = match form_type {
        ItrType::Itr1 => {
            if info.employers.len() > 1 {
                tracing::warn!(
                    employer_count = info.employers.len(),
                    "ITR-1 payload keeps only the first employer record"
                );
            }
            FormPayload::Itr1(Itr1Payload {
                salary_income: facts.salary_income,
                house_property_income: facts.house_property_income,
                other_sources_income: facts.other_sources_income,
                employer: info.employers.first().cloned(),
                property: info.properties.first().cloned(),
            })
        }
        ItrType::Itr2 => FormPayload::Itr2(Itr2Payload {
            salary_income: facts.salary_income,
            house_property_income: facts.house_property_income,
            capital_gains_income: facts.capital_gains_income,
            other_sources_income: facts.other_sources_income,
            employers: info.employers.clone(),
            properties: info.properties.clone(),
            capital_gains: info.capital_gain_entries.clone(),
            foreign_assets: info.foreign_assets.clone(),
        }),
    };

    Ok(ItrFormData {
        form_type,
        common: CommonReturnData {
            document_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            financial_year: facts.financial_year.clone(),
            assessment_year: facts.financial_year.assessment_year(),
            pan: info.pan.trim().to_ascii_uppercase(),
            name: info.name.trim().to_string(),
            address: info.address.clone(),
            bank: BankDetails {
                account_number: info.bank_account_number.clone(),
                ifsc: info.bank_ifsc.clone(),
            },
            regime: info.regime,
        },
        summary,
        payload,
    })
}

/// Build, validate, and serialize a return in one step.
///
/// # Errors
///
/// Everything [`build`] raises, plus [`FormsError::ValidationFailed`]
/// carrying the full report when any business rule is violated —
/// serialization does not run in that case.
pub fn generate(
    registry: &TaxConfigRegistry,
    facts: &IncomeFacts,
    info: &AdditionalInfo,
    form_type: ItrType,
) -> Result<GeneratedReturn, FormsError> {
    let data = build(registry, facts, info, form_type)?;
    let report = validate(&data);
    if !report.is_valid {
        return Err(FormsError::ValidationFailed { report });
    }
    let documents = serialize(&data);
    Ok(GeneratedReturn { data, documents })
}
