//! # Input Contracts
//!
//! The normalized records upstream collaborators hand to the engine:
//! [`IncomeFacts`] (aggregated income heads and structural flags, enough to
//! compute tax and select a form) and [`AdditionalInfo`] (identity, bank,
//! deductor and payment details, enough to populate the form).
//!
//! Every numeric field defaults to zero and every list to empty under
//! serde, matching the contract that callers never send nulls for numeric
//! fields. The engine reads these records; it never mutates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use itr_config::Regime;
use itr_core::money::clamp_non_negative;
use itr_core::FinancialYear;

/// The taxpayer category on the return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxpayerCategory {
    /// Natural person.
    Individual,
    /// Hindu Undivided Family.
    Huf,
    /// Partnership firm.
    Firm,
    /// Limited liability partnership.
    Llp,
    /// Company.
    Company,
}

impl TaxpayerCategory {
    /// Return the string representation of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Huf => "huf",
            Self::Firm => "firm",
            Self::Llp => "llp",
            Self::Company => "company",
        }
    }

    /// Return all category variants.
    pub fn all() -> &'static [TaxpayerCategory] {
        &[
            Self::Individual,
            Self::Huf,
            Self::Firm,
            Self::Llp,
            Self::Company,
        ]
    }
}

impl std::fmt::Display for TaxpayerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for TaxpayerCategory {
    fn default() -> Self {
        Self::Individual
    }
}

/// Residency status for the financial year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidencyStatus {
    /// Resident in India.
    Resident,
    /// Resident but not ordinarily resident.
    ResidentNotOrdinarilyResident,
    /// Non-resident.
    NonResident,
}

impl ResidencyStatus {
    /// Return the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::ResidentNotOrdinarilyResident => "resident_not_ordinarily_resident",
            Self::NonResident => "non_resident",
        }
    }
}

impl std::fmt::Display for ResidencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ResidencyStatus {
    fn default() -> Self {
        Self::Resident
    }
}

/// Aggregated, normalized income facts for one taxpayer and year.
///
/// Owned by the caller; the engine only reads it. Loss heads may be
/// negative and offset other heads; the aggregate floors at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeFacts {
    /// Financial year the facts cover.
    pub financial_year: FinancialYear,
    /// Taxpayer age in completed years (drives the old-regime age band).
    #[serde(default)]
    pub age: u32,
    /// Income chargeable under Salaries (post-exemptions, pre-standard-
    /// deduction).
    #[serde(default)]
    pub salary_income: Decimal,
    /// Net income (or loss) from house property.
    #[serde(default)]
    pub house_property_income: Decimal,
    /// Number of house properties owned.
    #[serde(default)]
    pub house_property_count: u32,
    /// Net capital gains (or loss) for the year.
    #[serde(default)]
    pub capital_gains_income: Decimal,
    /// Income from business or profession.
    #[serde(default)]
    pub business_income: Decimal,
    /// Income from other sources (interest, dividends, …).
    #[serde(default)]
    pub other_sources_income: Decimal,
    /// Any foreign-sourced income during the year.
    #[serde(default)]
    pub has_foreign_income: bool,
    /// Any foreign asset held during the year.
    #[serde(default)]
    pub has_foreign_assets: bool,
    /// Director of a company at any time during the year.
    #[serde(default)]
    pub is_company_director: bool,
    /// Held unlisted equity shares at any time during the year.
    #[serde(default)]
    pub holds_unlisted_shares: bool,
    /// Taxpayer category.
    #[serde(default)]
    pub category: TaxpayerCategory,
    /// Residency status.
    #[serde(default)]
    pub residency: ResidencyStatus,
}

impl IncomeFacts {
    /// Gross total income: the five heads summed (losses offset), floored
    /// at zero.
    pub fn gross_total_income(&self) -> Decimal {
        clamp_non_negative(
            self.salary_income
                + self.house_property_income
                + self.capital_gains_income
                + self.business_income
                + self.other_sources_income,
        )
    }

    /// Whether the capital gains schedule is engaged (a loss still
    /// engages it).
    pub fn has_capital_gains(&self) -> bool {
        self.capital_gains_income != Decimal::ZERO
    }

    /// Whether business or professional income is present.
    pub fn has_business_income(&self) -> bool {
        self.business_income != Decimal::ZERO
    }

    /// Whether the foreign schedules are engaged.
    pub fn has_foreign_exposure(&self) -> bool {
        self.has_foreign_income || self.has_foreign_assets
    }
}

/// One deductor's salary TDS record (one Form-16).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerTds {
    /// Employer name as on Form-16.
    pub employer_name: String,
    /// Deductor TAN.
    #[serde(default)]
    pub tan: String,
    /// Salary paid by this employer.
    #[serde(default)]
    pub salary_paid: Decimal,
    /// TDS deducted by this employer.
    #[serde(default)]
    pub tds_deducted: Decimal,
}

/// One house property's detail for the return schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePropertyDetail {
    /// Property address.
    pub address: String,
    /// Annual value (zero for self-occupied).
    #[serde(default)]
    pub annual_value: Decimal,
    /// Whether the property is self-occupied.
    #[serde(default)]
    pub is_self_occupied: bool,
}

/// One capital-gains entry for the ITR-2 schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalGainEntry {
    /// Asset description.
    pub description: String,
    /// Gain (negative for a loss).
    #[serde(default)]
    pub gain: Decimal,
    /// Long-term versus short-term classification.
    #[serde(default)]
    pub is_long_term: bool,
}

/// One foreign asset for the ITR-2 foreign-asset schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignAssetDetail {
    /// Country where the asset is held.
    pub country: String,
    /// Asset description.
    pub description: String,
    /// Peak value during the year.
    #[serde(default)]
    pub value: Decimal,
}

/// Identity, bank, deductor and payment details needed to populate a
/// return — everything the form needs beyond the income aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    /// Taxpayer PAN.
    pub pan: String,
    /// Taxpayer full name.
    pub name: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Refund bank account number.
    #[serde(default)]
    pub bank_account_number: String,
    /// Refund bank branch IFSC.
    #[serde(default)]
    pub bank_ifsc: String,
    /// Elected taxation regime.
    #[serde(default)]
    pub regime: Regime,
    /// Employer TDS records, one per Form-16.
    #[serde(default)]
    pub employers: Vec<EmployerTds>,
    /// House property details.
    #[serde(default)]
    pub properties: Vec<HousePropertyDetail>,
    /// Capital-gains entries.
    #[serde(default)]
    pub capital_gain_entries: Vec<CapitalGainEntry>,
    /// Foreign assets.
    #[serde(default)]
    pub foreign_assets: Vec<ForeignAssetDetail>,
    /// Declared annual TDS total.
    #[serde(default)]
    pub annual_tds: Decimal,
    /// TDS per quarter as reported in Form 26AS.
    #[serde(default)]
    pub quarterly_tds: [Decimal; 4],
    /// Advance tax paid during the year.
    #[serde(default)]
    pub advance_tax_paid: Decimal,
    /// Self-assessment tax paid before filing.
    #[serde(default)]
    pub self_assessment_tax_paid: Decimal,
}

impl AdditionalInfo {
    /// Total taxes paid or credited: TDS plus advance plus
    /// self-assessment.
    pub fn total_taxes_paid(&self) -> Decimal {
        self.annual_tds + self.advance_tax_paid + self.self_assessment_tax_paid
    }

    /// Sum of the quarterly TDS figures.
    pub fn quarterly_tds_total(&self) -> Decimal {
        self.quarterly_tds.iter().copied().sum()
    }
}
