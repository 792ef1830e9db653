//! # Money Arithmetic
//!
//! Decimal helpers shared by every computation in the engine. All amounts
//! are `rust_decimal::Decimal` in whole rupees (paise allowed in inputs);
//! floats never enter a money path.
//!
//! ## Rounding Policy
//!
//! Statutory amounts are rounded to the nearest whole rupee, half away from
//! zero, exactly once — at the final total of a computation. Intermediate
//! values (per-slab tax, pre-cess aggregates) retain full decimal precision
//! so that rounding error cannot compound across brackets.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to the nearest whole rupee, half away from zero.
///
/// `0.5` rounds to `1`, `-0.5` rounds to `-1`. This is the single terminal
/// rounding step of every computation; callers must not round intermediates.
pub fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `rate_percent` percent of `amount`, at full precision.
///
/// No rounding: `percent_of(dec!(1000), dec!(4))` is exactly `40`, and
/// `percent_of(dec!(1), dec!(1))` is exactly `0.01`.
pub fn percent_of(amount: Decimal, rate_percent: Decimal) -> Decimal {
    amount * rate_percent / Decimal::ONE_HUNDRED
}

/// Clamp a possibly-negative amount to zero.
///
/// Negative numeric inputs (loss carry-overs leaking into an aggregate,
/// over-credited TDS) are normalized rather than treated as errors.
pub fn clamp_non_negative(amount: Decimal) -> Decimal {
    if amount < Decimal::ZERO {
        Decimal::ZERO
    } else {
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // -- round_rupees --

    #[test]
    fn round_rupees_half_away_from_zero() {
        assert_eq!(round_rupees(dec!(10.5)), dec!(11));
        assert_eq!(round_rupees(dec!(-10.5)), dec!(-11));
        assert_eq!(round_rupees(dec!(10.4)), dec!(10));
        assert_eq!(round_rupees(dec!(10.6)), dec!(11));
    }

    #[test]
    fn round_rupees_whole_unchanged() {
        assert_eq!(round_rupees(dec!(142500)), dec!(142500));
        assert_eq!(round_rupees(Decimal::ZERO), Decimal::ZERO);
    }

    // -- percent_of --

    #[test]
    fn percent_of_exact() {
        assert_eq!(percent_of(dec!(300000), dec!(5)), dec!(15000));
        assert_eq!(percent_of(dec!(142500), dec!(4)), dec!(5700));
    }

    #[test]
    fn percent_of_retains_precision() {
        // 1% of 1 rupee is one paisa, not zero.
        assert_eq!(percent_of(dec!(1), dec!(1)), dec!(0.01));
    }

    // -- clamp_non_negative --

    #[test]
    fn clamp_negative_to_zero() {
        assert_eq!(clamp_non_negative(dec!(-250000)), Decimal::ZERO);
        assert_eq!(clamp_non_negative(dec!(250000)), dec!(250000));
        assert_eq!(clamp_non_negative(Decimal::ZERO), Decimal::ZERO);
    }
}
