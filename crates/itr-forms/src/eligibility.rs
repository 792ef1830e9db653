//! # ITR Eligibility Selector
//!
//! Chooses the return form a taxpayer's facts permit: ITR-1 when none of
//! its exclusion rules trigger, ITR-2 as the fallback for non-business
//! individuals and HUFs, otherwise "not supported" (the taxpayer needs
//! ITR-3 or later, outside this engine's scope).
//!
//! ## Determinism
//!
//! The exclusion rules are a declarative list of (reason code, predicate)
//! pairs evaluated in a fixed, documented order: income-limit checks before
//! structural checks before category checks. The first triggered rule is
//! the primary reason; every triggered rule is recorded. Identical facts
//! therefore always produce the identical recommendation and reasons —
//! there is no data-dependent tie-break.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::facts::{IncomeFacts, TaxpayerCategory};

/// Maximum total income for ITR-1 (Sahaj): ₹50,00,000.
pub const ITR1_INCOME_LIMIT: Decimal = dec!(5000000);

/// The return forms this engine can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItrType {
    /// ITR-1 (Sahaj): salary / single house property / other sources,
    /// total income up to ₹50L.
    Itr1,
    /// ITR-2: individuals and HUFs without business income.
    Itr2,
}

impl ItrType {
    /// Return the string representation of this form type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Itr1 => "itr1",
            Self::Itr2 => "itr2",
        }
    }

    /// The form name as printed on the return ("ITR-1" / "ITR-2").
    pub fn form_name(&self) -> &'static str {
        match self {
            Self::Itr1 => "ITR-1",
            Self::Itr2 => "ITR-2",
        }
    }
}

impl std::fmt::Display for ItrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The selector's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormRecommendation {
    /// ITR-1 is permitted.
    Itr1,
    /// ITR-1 is excluded; ITR-2 is permitted.
    Itr2,
    /// Neither supported form fits; ITR-3 or later is required.
    NotSupported,
}

impl FormRecommendation {
    /// Return the string representation of this recommendation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Itr1 => "itr1",
            Self::Itr2 => "itr2",
            Self::NotSupported => "not_supported",
        }
    }

    /// The recommended form, when one exists.
    pub fn form(&self) -> Option<ItrType> {
        match self {
            Self::Itr1 => Some(ItrType::Itr1),
            Self::Itr2 => Some(ItrType::Itr2),
            Self::NotSupported => None,
        }
    }
}

impl std::fmt::Display for FormRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a form was excluded. Codes are stable identifiers; messages are
/// derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// ITR-1: total income exceeds the ₹50L limit.
    IncomeAboveItr1Limit,
    /// ITR-1: capital gains schedule engaged.
    CapitalGainsPresent,
    /// ITR-1: business or professional income present.
    BusinessIncomePresent,
    /// ITR-1: more than one house property.
    MultipleHouseProperties,
    /// ITR-1: foreign income or foreign assets.
    ForeignIncomeOrAssets,
    /// ITR-1: directorship in a company.
    CompanyDirectorship,
    /// ITR-1: unlisted equity shares held.
    UnlistedSharesHeld,
    /// ITR-1: taxpayer is not an individual.
    CategoryNotIndividual,
    /// ITR-2: business income requires ITR-3.
    BusinessIncomeRequiresItr3,
    /// ITR-2: only individuals and HUFs may file it.
    CategoryRequiresOtherForm,
}

impl ReasonCode {
    /// Return the string representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncomeAboveItr1Limit => "income_above_itr1_limit",
            Self::CapitalGainsPresent => "capital_gains_present",
            Self::BusinessIncomePresent => "business_income_present",
            Self::MultipleHouseProperties => "multiple_house_properties",
            Self::ForeignIncomeOrAssets => "foreign_income_or_assets",
            Self::CompanyDirectorship => "company_directorship",
            Self::UnlistedSharesHeld => "unlisted_shares_held",
            Self::CategoryNotIndividual => "category_not_individual",
            Self::BusinessIncomeRequiresItr3 => "business_income_requires_itr3",
            Self::CategoryRequiresOtherForm => "category_requires_other_form",
        }
    }

    /// Human-readable rule statement for explanations.
    pub fn message(&self) -> &'static str {
        match self {
            Self::IncomeAboveItr1Limit => {
                "total income exceeds the ₹50,00,000 limit for ITR-1"
            }
            Self::CapitalGainsPresent => "capital gains require the ITR-2 schedule",
            Self::BusinessIncomePresent => "business income cannot be reported on ITR-1",
            Self::MultipleHouseProperties => "ITR-1 permits a single house property",
            Self::ForeignIncomeOrAssets => {
                "foreign income or assets require the ITR-2 schedules"
            }
            Self::CompanyDirectorship => "company directors cannot file ITR-1",
            Self::UnlistedSharesHeld => "holders of unlisted shares cannot file ITR-1",
            Self::CategoryNotIndividual => "only individuals may file ITR-1",
            Self::BusinessIncomeRequiresItr3 => {
                "business income requires ITR-3 or later"
            }
            Self::CategoryRequiresOtherForm => {
                "only individuals and HUFs may file ITR-2"
            }
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One triggered exclusion rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionReason {
    /// Stable reason code.
    pub code: ReasonCode,
    /// Human-readable rule statement.
    pub message: String,
}

impl SelectionReason {
    fn from_code(code: ReasonCode) -> Self {
        Self {
            code,
            message: code.message().to_string(),
        }
    }
}

/// The selector's full verdict with its reasoning trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItrSelectionResult {
    /// The recommended form, or `NotSupported`.
    pub recommended: FormRecommendation,
    /// Other forms the taxpayer could file instead.
    pub alternatives: Vec<ItrType>,
    /// The first triggered exclusion — the deterministic headline reason.
    /// `None` when ITR-1 passes cleanly.
    pub primary_reason: Option<SelectionReason>,
    /// Every triggered exclusion, in evaluation order.
    pub all_reasons: Vec<SelectionReason>,
    /// Prose summary of the verdict.
    pub explanation: String,
    /// Non-fatal cautions for the caller to surface.
    pub warnings: Vec<String>,
    /// True when the verdict needs explicit user confirmation before
    /// proceeding (only for `NotSupported`).
    pub requires_confirmation: bool,
}

/// One exclusion rule: a reason code and the predicate that triggers it.
struct ExclusionRule {
    code: ReasonCode,
    predicate: fn(&IncomeFacts) -> bool,
}

/// ITR-1 exclusions in precedence order: the income limit first, then
/// structural checks, then the category check. Reordering this list
/// changes `primary_reason` for multi-fault facts — it is part of the
/// contract.
const ITR1_EXCLUSIONS: &[ExclusionRule] = &[
    ExclusionRule {
        code: ReasonCode::IncomeAboveItr1Limit,
        predicate: |f| f.gross_total_income() > ITR1_INCOME_LIMIT,
    },
    ExclusionRule {
        code: ReasonCode::CapitalGainsPresent,
        predicate: IncomeFacts::has_capital_gains,
    },
    ExclusionRule {
        code: ReasonCode::BusinessIncomePresent,
        predicate: IncomeFacts::has_business_income,
    },
    ExclusionRule {
        code: ReasonCode::MultipleHouseProperties,
        predicate: |f| f.house_property_count > 1,
    },
    ExclusionRule {
        code: ReasonCode::ForeignIncomeOrAssets,
        predicate: IncomeFacts::has_foreign_exposure,
    },
    ExclusionRule {
        code: ReasonCode::CompanyDirectorship,
        predicate: |f| f.is_company_director,
    },
    ExclusionRule {
        code: ReasonCode::UnlistedSharesHeld,
        predicate: |f| f.holds_unlisted_shares,
    },
    ExclusionRule {
        code: ReasonCode::CategoryNotIndividual,
        predicate: |f| f.category != TaxpayerCategory::Individual,
    },
];

/// ITR-2 exclusions, evaluated only after ITR-1 is ruled out.
const ITR2_EXCLUSIONS: &[ExclusionRule] = &[
    ExclusionRule {
        code: ReasonCode::BusinessIncomeRequiresItr3,
        predicate: IncomeFacts::has_business_income,
    },
    ExclusionRule {
        code: ReasonCode::CategoryRequiresOtherForm,
        predicate: |f| {
            !matches!(
                f.category,
                TaxpayerCategory::Individual | TaxpayerCategory::Huf
            )
        },
    },
];

fn triggered(rules: &[ExclusionRule], facts: &IncomeFacts) -> Vec<SelectionReason> {
    rules
        .iter()
        .filter(|rule| (rule.predicate)(facts))
        .map(|rule| SelectionReason::from_code(rule.code))
        .collect()
}

/// Select the return form for a set of income facts.
///
/// Never fails: ineligibility is a business outcome, not an error. The
/// `NotSupported` verdict carries `requires_confirmation = true` and a
/// warning the caller must surface before doing anything irreversible.
pub fn select(facts: &IncomeFacts) -> ItrSelectionResult {
    let itr1_failures = triggered(ITR1_EXCLUSIONS, facts);

    if itr1_failures.is_empty() {
        // ITR-1 holders may always elect the broader ITR-2 instead.
        return ItrSelectionResult {
            recommended: FormRecommendation::Itr1,
            alternatives: vec![ItrType::Itr2],
            primary_reason: None,
            all_reasons: Vec::new(),
            explanation: "All ITR-1 conditions are satisfied; ITR-1 (Sahaj) is the \
                          simplest applicable form."
                .to_string(),
            warnings: Vec::new(),
            requires_confirmation: false,
        };
    }

    let itr2_failures = triggered(ITR2_EXCLUSIONS, facts);
    let primary = itr1_failures[0].clone();
    let mut all_reasons = itr1_failures;
    all_reasons.extend(itr2_failures.iter().cloned());

    if itr2_failures.is_empty() {
        let explanation = format!(
            "ITR-1 is excluded ({}); ITR-2 covers the declared income structure.",
            primary.message
        );
        return ItrSelectionResult {
            recommended: FormRecommendation::Itr2,
            alternatives: Vec::new(),
            primary_reason: Some(primary),
            all_reasons,
            explanation,
            warnings: Vec::new(),
            requires_confirmation: false,
        };
    }

    let explanation = format!(
        "Neither ITR-1 nor ITR-2 fits ({}); the return requires ITR-3 or later, \
         which this engine does not generate.",
        primary.message
    );
    ItrSelectionResult {
        recommended: FormRecommendation::NotSupported,
        alternatives: Vec::new(),
        primary_reason: Some(primary),
        all_reasons,
        explanation,
        warnings: vec![
            "The declared income structure requires ITR-3 or later; confirm before \
             proceeding with professional assistance."
                .to_string(),
        ],
        requires_confirmation: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::ResidencyStatus;
    use itr_core::FinancialYear;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn clean_facts() -> IncomeFacts {
        IncomeFacts {
            financial_year: FinancialYear::new("2023-24").unwrap(),
            age: 30,
            salary_income: dec!(800000),
            house_property_income: Decimal::ZERO,
            house_property_count: 1,
            capital_gains_income: Decimal::ZERO,
            business_income: Decimal::ZERO,
            other_sources_income: Decimal::ZERO,
            has_foreign_income: false,
            has_foreign_assets: false,
            is_company_director: false,
            holds_unlisted_shares: false,
            category: TaxpayerCategory::Individual,
            residency: ResidencyStatus::Resident,
        }
    }

    // -- clean ITR-1 --

    #[test]
    fn clean_salary_recommends_itr1() {
        let result = select(&clean_facts());
        assert_eq!(result.recommended, FormRecommendation::Itr1);
        assert_eq!(result.alternatives, vec![ItrType::Itr2]);
        assert!(result.primary_reason.is_none());
        assert!(result.all_reasons.is_empty());
        assert!(!result.requires_confirmation);
    }

    // -- single exclusions fall through to ITR-2 --

    #[test]
    fn capital_gains_excludes_itr1() {
        let mut facts = clean_facts();
        facts.capital_gains_income = dec!(120000);
        let result = select(&facts);
        assert_eq!(result.recommended, FormRecommendation::Itr2);
        assert_eq!(
            result.primary_reason.unwrap().code,
            ReasonCode::CapitalGainsPresent
        );
    }

    #[test]
    fn income_above_limit_excludes_itr1() {
        let mut facts = clean_facts();
        facts.salary_income = dec!(5000001);
        let result = select(&facts);
        assert_eq!(result.recommended, FormRecommendation::Itr2);
        assert_eq!(
            result.primary_reason.unwrap().code,
            ReasonCode::IncomeAboveItr1Limit
        );
    }

    #[test]
    fn income_exactly_at_limit_keeps_itr1() {
        let mut facts = clean_facts();
        facts.salary_income = ITR1_INCOME_LIMIT;
        assert_eq!(select(&facts).recommended, FormRecommendation::Itr1);
    }

    #[test]
    fn second_house_property_excludes_itr1() {
        let mut facts = clean_facts();
        facts.house_property_count = 2;
        let result = select(&facts);
        assert_eq!(result.recommended, FormRecommendation::Itr2);
        assert_eq!(
            result.primary_reason.unwrap().code,
            ReasonCode::MultipleHouseProperties
        );
    }

    #[test]
    fn foreign_assets_exclude_itr1() {
        let mut facts = clean_facts();
        facts.has_foreign_assets = true;
        let result = select(&facts);
        assert_eq!(result.recommended, FormRecommendation::Itr2);
        assert_eq!(
            result.primary_reason.unwrap().code,
            ReasonCode::ForeignIncomeOrAssets
        );
    }

    #[test]
    fn directorship_and_unlisted_shares_exclude_itr1() {
        let mut facts = clean_facts();
        facts.is_company_director = true;
        assert_eq!(
            select(&facts).primary_reason.unwrap().code,
            ReasonCode::CompanyDirectorship
        );

        let mut facts = clean_facts();
        facts.holds_unlisted_shares = true;
        assert_eq!(
            select(&facts).primary_reason.unwrap().code,
            ReasonCode::UnlistedSharesHeld
        );
    }

    #[test]
    fn huf_skips_itr1_lands_on_itr2() {
        let mut facts = clean_facts();
        facts.category = TaxpayerCategory::Huf;
        let result = select(&facts);
        assert_eq!(result.recommended, FormRecommendation::Itr2);
        assert_eq!(
            result.primary_reason.unwrap().code,
            ReasonCode::CategoryNotIndividual
        );
    }

    // -- precedence --

    #[test]
    fn income_limit_outranks_structural_checks() {
        let mut facts = clean_facts();
        facts.salary_income = dec!(6000000);
        facts.capital_gains_income = dec!(100000);
        facts.house_property_count = 3;
        let result = select(&facts);
        assert_eq!(
            result.primary_reason.unwrap().code,
            ReasonCode::IncomeAboveItr1Limit
        );
        // Every triggered rule is still on record.
        let codes: Vec<ReasonCode> = result.all_reasons.iter().map(|r| r.code).collect();
        assert_eq!(
            codes,
            vec![
                ReasonCode::IncomeAboveItr1Limit,
                ReasonCode::CapitalGainsPresent,
                ReasonCode::MultipleHouseProperties,
            ]
        );
    }

    #[test]
    fn structural_outranks_category() {
        let mut facts = clean_facts();
        facts.category = TaxpayerCategory::Huf;
        facts.capital_gains_income = dec!(1);
        assert_eq!(
            select(&facts).primary_reason.unwrap().code,
            ReasonCode::CapitalGainsPresent
        );
    }

    // -- not supported --

    #[test]
    fn business_income_is_not_supported() {
        let mut facts = clean_facts();
        facts.business_income = dec!(300000);
        let result = select(&facts);
        assert_eq!(result.recommended, FormRecommendation::NotSupported);
        assert!(result.requires_confirmation);
        assert!(!result.warnings.is_empty());
        assert_eq!(
            result.primary_reason.unwrap().code,
            ReasonCode::BusinessIncomePresent
        );
        let codes: Vec<ReasonCode> = result.all_reasons.iter().map(|r| r.code).collect();
        assert!(codes.contains(&ReasonCode::BusinessIncomeRequiresItr3));
    }

    #[test]
    fn company_is_not_supported() {
        let mut facts = clean_facts();
        facts.category = TaxpayerCategory::Company;
        let result = select(&facts);
        assert_eq!(result.recommended, FormRecommendation::NotSupported);
        assert_eq!(
            result.primary_reason.unwrap().code,
            ReasonCode::CategoryNotIndividual
        );
    }

    // -- determinism --

    #[test]
    fn identical_facts_identical_verdict() {
        let mut facts = clean_facts();
        facts.capital_gains_income = dec!(100000);
        facts.has_foreign_income = true;
        let first = select(&facts);
        for _ in 0..5 {
            assert_eq!(select(&facts), first);
        }
    }
}
