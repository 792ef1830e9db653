//! # Configuration Registry
//!
//! The per-financial-year configuration store. Built once at process start
//! (built-in statutory years, optionally extended from YAML documents) and
//! read-only thereafter — lookups borrow, computation crates never hold a
//! mutable reference.

use std::collections::BTreeMap;

use itr_core::FinancialYear;

use crate::config::{Regime, TaxConfiguration};
use crate::error::ConfigError;
use crate::slab::SlabTable;
use crate::years;

/// Registry of [`TaxConfiguration`]s keyed by financial year.
///
/// `BTreeMap` keeps iteration order deterministic for diagnostics and
/// serialized listings.
#[derive(Debug, Clone, Default)]
pub struct TaxConfigRegistry {
    years: BTreeMap<FinancialYear, TaxConfiguration>,
}

impl TaxConfigRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }

    /// Create a registry pre-loaded with the built-in statutory years
    /// (FY 2023-24 and FY 2024-25).
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for cfg in [years::fy_2023_24(), years::fy_2024_25()] {
            // Built-in tables validate by construction; insert cannot fail.
            if let Err(err) = registry.insert(cfg) {
                tracing::error!(error = %err, "built-in tax table failed validation");
            }
        }
        registry
    }

    /// Register a configuration, replacing any existing entry for the year.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error if its surcharge tiers
    /// are unordered. Slab tables are already validated by construction.
    pub fn insert(&mut self, config: TaxConfiguration) -> Result<(), ConfigError> {
        config.validate()?;
        let year = config.financial_year.clone();
        if self.years.insert(year.clone(), config).is_some() {
            tracing::warn!(financial_year = %year, "replacing tax configuration");
        }
        Ok(())
    }

    /// Load one configuration from a YAML document and register it.
    ///
    /// # Errors
    ///
    /// Returns a YAML error for malformed documents (including slab tables
    /// violating the bracket invariants) or a validation error for
    /// unordered surcharge tiers.
    pub fn load_yaml(&mut self, document: &str) -> Result<(), ConfigError> {
        let config: TaxConfiguration = serde_yaml::from_str(document)?;
        self.insert(config)
    }

    /// Look up the configuration for a financial year.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigurationNotFound`] for an unregistered
    /// year.
    pub fn get(&self, year: &FinancialYear) -> Result<&TaxConfiguration, ConfigError> {
        self.years
            .get(year)
            .ok_or_else(|| ConfigError::ConfigurationNotFound(year.as_str().to_string()))
    }

    /// The slab table for a (year, regime, age) triple.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigurationNotFound`] for an unregistered
    /// year.
    pub fn slabs(
        &self,
        year: &FinancialYear,
        regime: Regime,
        age: u32,
    ) -> Result<&SlabTable, ConfigError> {
        Ok(self.get(year)?.slabs(regime, age))
    }

    /// Registered financial years, in ascending order.
    pub fn financial_years(&self) -> impl Iterator<Item = &FinancialYear> {
        self.years.keys()
    }

    /// Number of registered years.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fy(s: &str) -> FinancialYear {
        FinancialYear::new(s).unwrap()
    }

    // -- lookup --

    #[test]
    fn builtin_has_both_years() {
        let registry = TaxConfigRegistry::builtin();
        assert_eq!(registry.len(), 2);
        assert!(registry.get(&fy("2023-24")).is_ok());
        assert!(registry.get(&fy("2024-25")).is_ok());
    }

    #[test]
    fn unknown_year_is_configuration_not_found() {
        let registry = TaxConfigRegistry::builtin();
        let err = registry.get(&fy("2019-20")).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigurationNotFound(ref y) if y == "2019-20"));
    }

    #[test]
    fn slabs_lookup_dispatches() {
        let registry = TaxConfigRegistry::builtin();
        let table = registry.slabs(&fy("2023-24"), Regime::New, 30).unwrap();
        assert_eq!(table.basic_exemption_limit(), dec!(300000));
        let table = registry.slabs(&fy("2023-24"), Regime::Old, 82).unwrap();
        assert_eq!(table.basic_exemption_limit(), dec!(500000));
    }

    #[test]
    fn financial_years_sorted() {
        let registry = TaxConfigRegistry::builtin();
        let listed: Vec<&str> = registry.financial_years().map(|y| y.as_str()).collect();
        assert_eq!(listed, vec!["2023-24", "2024-25"]);
    }

    // -- YAML loading --

    #[test]
    fn load_yaml_registers_year() {
        let mut registry = TaxConfigRegistry::new();
        let doc = r#"
financial_year: "2025-26"
standard_deduction: "75000"
cess_rate_percent: "4"
surcharge_tiers:
  - income_threshold: "5000000"
    rate_percent: "10"
  - income_threshold: "10000000"
    rate_percent: "15"
  - income_threshold: "20000000"
    rate_percent: "25"
old_regime:
  below_60:
    - { min_income: "0", max_income: "250000", rate_percent: "0", label: "nil" }
    - { min_income: "250000", max_income: null, rate_percent: "30", label: "top" }
  senior:
    - { min_income: "0", max_income: "300000", rate_percent: "0", label: "nil" }
    - { min_income: "300000", max_income: null, rate_percent: "30", label: "top" }
  super_senior:
    - { min_income: "0", max_income: "500000", rate_percent: "0", label: "nil" }
    - { min_income: "500000", max_income: null, rate_percent: "30", label: "top" }
new_regime:
  - { min_income: "0", max_income: "400000", rate_percent: "0", label: "nil" }
  - { min_income: "400000", max_income: null, rate_percent: "30", label: "top" }
"#;
        registry.load_yaml(doc).unwrap();
        let cfg = registry.get(&fy("2025-26")).unwrap();
        assert_eq!(cfg.standard_deduction, dec!(75000));
        assert_eq!(cfg.new_regime.basic_exemption_limit(), dec!(400000));
    }

    #[test]
    fn load_yaml_rejects_malformed_table() {
        let mut registry = TaxConfigRegistry::new();
        // Gap between brackets: 250000 -> 300000.
        let doc = r#"
financial_year: "2025-26"
standard_deduction: "50000"
cess_rate_percent: "4"
surcharge_tiers: []
old_regime:
  below_60:
    - { min_income: "0", max_income: "250000", rate_percent: "0", label: "nil" }
    - { min_income: "300000", max_income: null, rate_percent: "30", label: "top" }
  senior:
    - { min_income: "0", max_income: null, rate_percent: "0", label: "nil" }
  super_senior:
    - { min_income: "0", max_income: null, rate_percent: "0", label: "nil" }
new_regime:
  - { min_income: "0", max_income: null, rate_percent: "0", label: "nil" }
"#;
        assert!(matches!(
            registry.load_yaml(doc),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn insert_replaces_existing_year() {
        let mut registry = TaxConfigRegistry::builtin();
        let mut replacement = crate::years::fy_2023_24();
        replacement.standard_deduction = dec!(60000);
        registry.insert(replacement).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get(&fy("2023-24")).unwrap().standard_deduction,
            dec!(60000)
        );
    }
}
