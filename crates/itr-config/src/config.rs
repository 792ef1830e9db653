//! # Per-Year Tax Configuration
//!
//! [`TaxConfiguration`] bundles everything the computation crates need for
//! one financial year: slab tables for both regimes (old-regime tables per
//! age band), surcharge tiers, the cess rate, and the standard deduction.
//! Immutable once registered; regenerated yearly from the Finance Act, not
//! patched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use itr_core::FinancialYear;

use crate::error::ConfigError;
use crate::slab::SlabTable;

/// The taxation regime elected by the taxpayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Pre-2020 regime: higher rates, deductions allowed.
    Old,
    /// Section 115BAC regime: lower rates, most deductions forgone.
    New,
}

impl Regime {
    /// Return the string representation of this regime.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    /// Return both regime variants.
    pub fn all() -> &'static [Regime] {
        &[Self::Old, Self::New]
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Regime {
    /// The new regime is the statutory default election since FY 2023-24.
    fn default() -> Self {
        Self::New
    }
}

/// Age band determining the old-regime basic exemption.
///
/// New-regime slabs are age-independent; the band still appears in results
/// for traceability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    /// Below 60 years.
    Below60,
    /// Senior citizen: 60 to 79 years.
    Senior,
    /// Super senior citizen: 80 years and above.
    SuperSenior,
}

impl AgeBand {
    /// Classify an age in completed years.
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=59 => Self::Below60,
            60..=79 => Self::Senior,
            _ => Self::SuperSenior,
        }
    }

    /// Return the string representation of this age band.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Below60 => "below_60",
            Self::Senior => "senior",
            Self::SuperSenior => "super_senior",
        }
    }
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One surcharge tier: a taxable-income threshold and the flat rate applied
/// to the whole tax amount once income exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeTier {
    /// Taxable income above which this tier applies (exclusive).
    pub income_threshold: Decimal,
    /// Surcharge rate in percent, applied to tax (not income).
    pub rate_percent: Decimal,
}

/// Old-regime slab tables, one per age band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBandedTables {
    /// Table for taxpayers below 60.
    pub below_60: SlabTable,
    /// Table for senior citizens (60–79).
    pub senior: SlabTable,
    /// Table for super senior citizens (80+).
    pub super_senior: SlabTable,
}

impl AgeBandedTables {
    /// The table for an age band.
    pub fn for_band(&self, band: AgeBand) -> &SlabTable {
        match band {
            AgeBand::Below60 => &self.below_60,
            AgeBand::Senior => &self.senior,
            AgeBand::SuperSenior => &self.super_senior,
        }
    }
}

/// Complete statutory configuration for one financial year.
///
/// Looked up by financial-year key in the
/// [`TaxConfigRegistry`](crate::registry::TaxConfigRegistry); never mutated
/// after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfiguration {
    /// The financial year these tables apply to.
    pub financial_year: FinancialYear,
    /// Standard deduction from salary income.
    pub standard_deduction: Decimal,
    /// Surcharge tiers in ascending threshold order.
    pub surcharge_tiers: Vec<SurchargeTier>,
    /// Health & education cess rate in percent, applied to tax plus
    /// surcharge.
    pub cess_rate_percent: Decimal,
    /// Old-regime tables, varying by age band.
    pub old_regime: AgeBandedTables,
    /// New-regime table (age-independent).
    pub new_regime: SlabTable,
}

impl TaxConfiguration {
    /// The slab table for a regime and age.
    pub fn slabs(&self, regime: Regime, age: u32) -> &SlabTable {
        match regime {
            Regime::New => &self.new_regime,
            Regime::Old => self.old_regime.for_band(AgeBand::from_age(age)),
        }
    }

    /// The basic exemption limit for a regime and age.
    pub fn basic_exemption_limit(&self, regime: Regime, age: u32) -> Decimal {
        self.slabs(regime, age).basic_exemption_limit()
    }

    /// Check tier ordering. Slab tables validate themselves at
    /// construction; surcharge tiers are a plain `Vec` and are checked
    /// here, at registration time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnorderedSurchargeTiers`] if thresholds are
    /// not strictly ascending or rates decrease across tiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, pair) in self.surcharge_tiers.windows(2).enumerate() {
            let ascending = pair[0].income_threshold < pair[1].income_threshold
                && pair[0].rate_percent <= pair[1].rate_percent;
            if !ascending {
                return Err(ConfigError::UnorderedSurchargeTiers { index: index + 1 });
            }
        }
        Ok(())
    }

    /// The surcharge tier applicable to a taxable income, if any: the
    /// highest tier whose threshold the income strictly exceeds.
    pub fn surcharge_tier_for(&self, taxable_income: Decimal) -> Option<&SurchargeTier> {
        self.surcharge_tiers
            .iter()
            .rev()
            .find(|tier| taxable_income > tier.income_threshold)
    }

    /// The tier immediately below the given tier, if any. Marginal relief
    /// at a threshold compares against tax computed at that threshold,
    /// which attracts the lower tier's surcharge.
    pub fn tier_below(&self, tier: &SurchargeTier) -> Option<&SurchargeTier> {
        self.surcharge_tiers
            .iter()
            .rev()
            .find(|t| t.income_threshold < tier.income_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::years::fy_2023_24;
    use rust_decimal_macros::dec;

    // -- Regime / AgeBand --

    #[test]
    fn regime_display() {
        assert_eq!(Regime::Old.to_string(), "old");
        assert_eq!(Regime::New.to_string(), "new");
        assert_eq!(Regime::all().len(), 2);
    }

    #[test]
    fn age_band_classification() {
        assert_eq!(AgeBand::from_age(0), AgeBand::Below60);
        assert_eq!(AgeBand::from_age(59), AgeBand::Below60);
        assert_eq!(AgeBand::from_age(60), AgeBand::Senior);
        assert_eq!(AgeBand::from_age(79), AgeBand::Senior);
        assert_eq!(AgeBand::from_age(80), AgeBand::SuperSenior);
        assert_eq!(AgeBand::from_age(104), AgeBand::SuperSenior);
    }

    #[test]
    fn regime_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Regime::New).unwrap(), "\"new\"");
        let parsed: Regime = serde_json::from_str("\"old\"").unwrap();
        assert_eq!(parsed, Regime::Old);
    }

    // -- TaxConfiguration --

    #[test]
    fn slabs_dispatch_by_regime_and_age() {
        let cfg = fy_2023_24();
        // New regime ignores age.
        assert_eq!(cfg.slabs(Regime::New, 30), cfg.slabs(Regime::New, 85));
        // Old regime exemption rises with age band.
        assert_eq!(cfg.basic_exemption_limit(Regime::Old, 30), dec!(250000));
        assert_eq!(cfg.basic_exemption_limit(Regime::Old, 65), dec!(300000));
        assert_eq!(cfg.basic_exemption_limit(Regime::Old, 82), dec!(500000));
    }

    #[test]
    fn surcharge_tier_selection() {
        let cfg = fy_2023_24();
        assert!(cfg.surcharge_tier_for(dec!(4000000)).is_none());
        assert!(cfg.surcharge_tier_for(dec!(5000000)).is_none());
        assert_eq!(
            cfg.surcharge_tier_for(dec!(5000001)).unwrap().rate_percent,
            dec!(10)
        );
        assert_eq!(
            cfg.surcharge_tier_for(dec!(15000000)).unwrap().rate_percent,
            dec!(15)
        );
        assert_eq!(
            cfg.surcharge_tier_for(dec!(25000000)).unwrap().rate_percent,
            dec!(25)
        );
    }

    #[test]
    fn tier_below_walks_down() {
        let cfg = fy_2023_24();
        let top = cfg.surcharge_tier_for(dec!(25000000)).unwrap();
        let mid = cfg.tier_below(top).unwrap();
        assert_eq!(mid.rate_percent, dec!(15));
        let low = cfg.tier_below(mid).unwrap();
        assert_eq!(low.rate_percent, dec!(10));
        assert!(cfg.tier_below(low).is_none());
    }

    #[test]
    fn unordered_tiers_rejected() {
        let mut cfg = fy_2023_24();
        cfg.surcharge_tiers.swap(0, 1);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::UnorderedSurchargeTiers { .. })
        ));
    }

    #[test]
    fn builtin_config_validates() {
        assert!(fy_2023_24().validate().is_ok());
    }
}
