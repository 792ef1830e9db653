//! # Slab Tax Calculator
//!
//! Applies a progressive slab table to taxable income, then surcharge (with
//! marginal relief), then cess, producing an itemized
//! [`TaxCalculationResult`].
//!
//! ## Algorithm
//!
//! For each bracket in order, the income falling inside the bracket is
//! `clamp(income, min, max) - min`; the bracket's tax is that amount times
//! the bracket rate. The per-bracket amounts always sum back to the taxable
//! income — the breakdown is a partition, not an approximation.
//!
//! ## Surcharge and Marginal Relief
//!
//! Surcharge uses the single applicable tier's flat rate on the whole tax
//! amount, not a per-tier marginal schedule. Flat tier rates create a cliff
//! at each threshold: one extra rupee of income could otherwise raise the
//! bill by lakhs. Marginal relief caps the surcharge so that tax plus
//! surcharge never exceeds what was payable at the threshold plus the
//! income earned beyond it.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use itr_config::{Regime, SlabTable, TaxConfigRegistry, TaxConfiguration};
use itr_core::money::{clamp_non_negative, percent_of, round_rupees};
use itr_core::FinancialYear;

use crate::error::ComputeError;

/// Tax accrued in one bracket of the slab breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabComputation {
    /// Bracket label from the configuration table.
    pub label: String,
    /// Lower bound of the bracket (inclusive).
    pub min_income: Decimal,
    /// Upper bound of the bracket, `None` for the open-ended top bracket.
    pub max_income: Option<Decimal>,
    /// Bracket rate in percent.
    pub rate_percent: Decimal,
    /// Income falling inside this bracket.
    pub income_in_slab: Decimal,
    /// Tax accrued in this bracket, full precision.
    pub tax_amount: Decimal,
}

/// Itemized result of one slab computation. Derived value — regenerate for
/// new inputs, never mutate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    /// Taxable income the computation ran on (after negative-input
    /// normalization).
    pub taxable_income: Decimal,
    /// Financial year of the applied table.
    pub financial_year: FinancialYear,
    /// Regime of the applied table.
    pub regime: Regime,
    /// Taxpayer age in completed years.
    pub age: u32,
    /// Per-bracket breakdown, in bracket order.
    pub slab_breakdown: Vec<SlabComputation>,
    /// Slab tax before surcharge and cess, full precision.
    pub total_tax: Decimal,
    /// Applicable surcharge tier rate in percent (0 below the first tier).
    pub surcharge_rate_percent: Decimal,
    /// Surcharge amount after marginal relief.
    pub surcharge: Decimal,
    /// Tax plus surcharge.
    pub total_tax_with_surcharge: Decimal,
    /// Health & education cess on tax plus surcharge.
    pub cess: Decimal,
    /// Final payable amount, rounded to whole rupees.
    pub total_tax_with_cess: Decimal,
    /// Effective rate: final payable over taxable income, in percent.
    pub effective_rate_percent: Decimal,
}

/// Compute tax for a taxable income under a (year, regime, age) table.
///
/// Negative income is clamped to zero and logged — upstream aggregation
/// bugs should be visible, but a loss-heavy year is not an error.
///
/// # Errors
///
/// Returns [`ComputeError::Configuration`] when the financial year has no
/// registered table.
pub fn compute(
    registry: &TaxConfigRegistry,
    taxable_income: Decimal,
    financial_year: &FinancialYear,
    regime: Regime,
    age: u32,
) -> Result<TaxCalculationResult, ComputeError> {
    if taxable_income < Decimal::ZERO {
        tracing::warn!(
            taxable_income = %taxable_income,
            financial_year = %financial_year,
            "negative taxable income clamped to zero"
        );
    }
    let income = clamp_non_negative(taxable_income);

    let config = registry.get(financial_year)?;
    let table = config.slabs(regime, age);

    let slab_breakdown = breakdown(table, income);
    let total_tax: Decimal = slab_breakdown.iter().map(|s| s.tax_amount).sum();

    let (surcharge, surcharge_rate_percent) =
        surcharge_with_marginal_relief(config, table, income, total_tax);

    let total_tax_with_surcharge = total_tax + surcharge;
    let cess = percent_of(total_tax_with_surcharge, config.cess_rate_percent);
    let total_tax_with_cess = round_rupees(total_tax_with_surcharge + cess);

    let effective_rate_percent = if income > Decimal::ZERO {
        (total_tax_with_cess / income * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    Ok(TaxCalculationResult {
        taxable_income: income,
        financial_year: financial_year.clone(),
        regime,
        age,
        slab_breakdown,
        total_tax,
        surcharge_rate_percent,
        surcharge,
        total_tax_with_surcharge,
        cess,
        total_tax_with_cess,
        effective_rate_percent,
    })
}

/// Partition `income` across the table's brackets.
fn breakdown(table: &SlabTable, income: Decimal) -> Vec<SlabComputation> {
    table
        .slabs()
        .iter()
        .map(|slab| {
            let capped = match slab.max_income {
                Some(max) => income.min(max),
                None => income,
            };
            let income_in_slab = clamp_non_negative(capped - slab.min_income);
            SlabComputation {
                label: slab.label.clone(),
                min_income: slab.min_income,
                max_income: slab.max_income,
                rate_percent: slab.rate_percent,
                income_in_slab,
                tax_amount: percent_of(income_in_slab, slab.rate_percent),
            }
        })
        .collect()
}

/// Slab tax for an income, without materializing a breakdown. Used for the
/// marginal-relief comparison at the tier threshold.
fn slab_tax(table: &SlabTable, income: Decimal) -> Decimal {
    table
        .slabs()
        .iter()
        .map(|slab| {
            let capped = match slab.max_income {
                Some(max) => income.min(max),
                None => income,
            };
            percent_of(clamp_non_negative(capped - slab.min_income), slab.rate_percent)
        })
        .sum()
}

/// Surcharge for an income and its slab tax: the applicable tier's flat
/// rate, capped by marginal relief.
///
/// The cap: tax plus surcharge must not exceed the amount payable at the
/// tier threshold (which attracts the *lower* tier's surcharge) plus the
/// income in excess of the threshold. Returns `(surcharge, tier rate)`;
/// both zero below the first tier.
fn surcharge_with_marginal_relief(
    config: &TaxConfiguration,
    table: &SlabTable,
    income: Decimal,
    total_tax: Decimal,
) -> (Decimal, Decimal) {
    let tier = match config.surcharge_tier_for(income) {
        Some(tier) => tier,
        None => return (Decimal::ZERO, Decimal::ZERO),
    };

    let flat = percent_of(total_tax, tier.rate_percent);

    let tax_at_threshold = slab_tax(table, tier.income_threshold);
    let rate_below = config
        .tier_below(tier)
        .map(|t| t.rate_percent)
        .unwrap_or(Decimal::ZERO);
    let surcharge_at_threshold = percent_of(tax_at_threshold, rate_below);
    let max_payable =
        tax_at_threshold + surcharge_at_threshold + (income - tier.income_threshold);
    let relief_cap = clamp_non_negative(max_payable - total_tax);

    (flat.min(relief_cap), tier.rate_percent)
}
