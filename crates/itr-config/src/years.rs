//! # Built-In Statutory Years
//!
//! The Finance Act tables the engine ships with. These are data definitions
//! only — adding a year means adding a function here (or loading a YAML
//! document at runtime) and nothing else changes.
//!
//! Amounts are whole rupees; rates are percent.

use rust_decimal_macros::dec;

use itr_core::FinancialYear;

use crate::config::{AgeBandedTables, SurchargeTier, TaxConfiguration};
use crate::slab::{slab, SlabTable};

/// Surcharge tiers common to the built-in years: 10% above ₹50L, 15% above
/// ₹1Cr, 25% above ₹2Cr, each applied flat to the tax amount with marginal
/// relief at the boundary.
fn standard_surcharge_tiers() -> Vec<SurchargeTier> {
    vec![
        SurchargeTier {
            income_threshold: dec!(5000000),
            rate_percent: dec!(10),
        },
        SurchargeTier {
            income_threshold: dec!(10000000),
            rate_percent: dec!(15),
        },
        SurchargeTier {
            income_threshold: dec!(20000000),
            rate_percent: dec!(25),
        },
    ]
}

/// Old-regime tables, unchanged across the built-in years.
fn old_regime_tables() -> AgeBandedTables {
    let below_60 = SlabTable::new(vec![
        slab(dec!(0), Some(dec!(250000)), dec!(0), "up to ₹2,50,000"),
        slab(dec!(250000), Some(dec!(500000)), dec!(5), "₹2,50,001 – ₹5,00,000"),
        slab(dec!(500000), Some(dec!(1000000)), dec!(20), "₹5,00,001 – ₹10,00,000"),
        slab(dec!(1000000), None, dec!(30), "above ₹10,00,000"),
    ])
    .expect("statutory table is well-formed");

    let senior = SlabTable::new(vec![
        slab(dec!(0), Some(dec!(300000)), dec!(0), "up to ₹3,00,000"),
        slab(dec!(300000), Some(dec!(500000)), dec!(5), "₹3,00,001 – ₹5,00,000"),
        slab(dec!(500000), Some(dec!(1000000)), dec!(20), "₹5,00,001 – ₹10,00,000"),
        slab(dec!(1000000), None, dec!(30), "above ₹10,00,000"),
    ])
    .expect("statutory table is well-formed");

    let super_senior = SlabTable::new(vec![
        slab(dec!(0), Some(dec!(500000)), dec!(0), "up to ₹5,00,000"),
        slab(dec!(500000), Some(dec!(1000000)), dec!(20), "₹5,00,001 – ₹10,00,000"),
        slab(dec!(1000000), None, dec!(30), "above ₹10,00,000"),
    ])
    .expect("statutory table is well-formed");

    AgeBandedTables {
        below_60,
        senior,
        super_senior,
    }
}

/// Financial year 2023-24 (assessment year 2024-25).
pub fn fy_2023_24() -> TaxConfiguration {
    let new_regime = SlabTable::new(vec![
        slab(dec!(0), Some(dec!(300000)), dec!(0), "up to ₹3,00,000"),
        slab(dec!(300000), Some(dec!(600000)), dec!(5), "₹3,00,001 – ₹6,00,000"),
        slab(dec!(600000), Some(dec!(900000)), dec!(10), "₹6,00,001 – ₹9,00,000"),
        slab(dec!(900000), Some(dec!(1200000)), dec!(15), "₹9,00,001 – ₹12,00,000"),
        slab(dec!(1200000), Some(dec!(1500000)), dec!(20), "₹12,00,001 – ₹15,00,000"),
        slab(dec!(1500000), None, dec!(30), "above ₹15,00,000"),
    ])
    .expect("statutory table is well-formed");

    TaxConfiguration {
        financial_year: FinancialYear::new("2023-24").expect("literal year is valid"),
        standard_deduction: dec!(50000),
        surcharge_tiers: standard_surcharge_tiers(),
        cess_rate_percent: dec!(4),
        old_regime: old_regime_tables(),
        new_regime,
    }
}

/// Financial year 2024-25 (assessment year 2025-26). The new-regime 5% and
/// 10% brackets widened; the old regime is unchanged.
pub fn fy_2024_25() -> TaxConfiguration {
    let new_regime = SlabTable::new(vec![
        slab(dec!(0), Some(dec!(300000)), dec!(0), "up to ₹3,00,000"),
        slab(dec!(300000), Some(dec!(700000)), dec!(5), "₹3,00,001 – ₹7,00,000"),
        slab(dec!(700000), Some(dec!(1000000)), dec!(10), "₹7,00,001 – ₹10,00,000"),
        slab(dec!(1000000), Some(dec!(1200000)), dec!(15), "₹10,00,001 – ₹12,00,000"),
        slab(dec!(1200000), Some(dec!(1500000)), dec!(20), "₹12,00,001 – ₹15,00,000"),
        slab(dec!(1500000), None, dec!(30), "above ₹15,00,000"),
    ])
    .expect("statutory table is well-formed");

    TaxConfiguration {
        financial_year: FinancialYear::new("2024-25").expect("literal year is valid"),
        standard_deduction: dec!(50000),
        surcharge_tiers: standard_surcharge_tiers(),
        cess_rate_percent: dec!(4),
        old_regime: old_regime_tables(),
        new_regime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn fy_2023_24_new_regime_shape() {
        let cfg = fy_2023_24();
        let slabs = cfg.new_regime.slabs();
        assert_eq!(slabs.len(), 6);
        assert_eq!(slabs[0].rate_percent, Decimal::ZERO);
        assert_eq!(slabs[5].max_income, None);
        assert_eq!(cfg.new_regime.basic_exemption_limit(), dec!(300000));
    }

    #[test]
    fn fy_2024_25_widened_brackets() {
        let cfg = fy_2024_25();
        let slabs = cfg.new_regime.slabs();
        assert_eq!(slabs[1].max_income, Some(dec!(700000)));
        assert_eq!(slabs[2].max_income, Some(dec!(1000000)));
    }

    #[test]
    fn both_years_validate() {
        assert!(fy_2023_24().validate().is_ok());
        assert!(fy_2024_25().validate().is_ok());
    }

    #[test]
    fn surcharge_tiers_shared_shape() {
        for cfg in [fy_2023_24(), fy_2024_25()] {
            assert_eq!(cfg.surcharge_tiers.len(), 3);
            assert_eq!(cfg.cess_rate_percent, dec!(4));
        }
    }
}
