//! # Refund / Demand Settlement
//!
//! Nets the total liability (including interest charges) against taxes
//! already paid — TDS, advance tax, self-assessment tax — into a single
//! refund-or-demand position. Pure arithmetic; no rounding beyond the
//! inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The taxpayer's net position after crediting all payments.
///
/// Exactly one of `refund_amount` / `additional_due` is nonzero (both zero
/// when settled exactly), and their difference always equals
/// `amount_paid - total_liability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundOrDemand {
    /// Total liability, including interest charges.
    pub total_liability: Decimal,
    /// Total taxes already paid or credited.
    pub amount_paid: Decimal,
    /// Amount due back to the taxpayer.
    pub refund_amount: Decimal,
    /// Amount still owed to the department.
    pub additional_due: Decimal,
    /// True when paid exceeds liability.
    pub is_refund: bool,
}

/// Net a liability against payments.
pub fn resolve(total_liability: Decimal, amount_paid: Decimal) -> RefundOrDemand {
    let delta = amount_paid - total_liability;
    RefundOrDemand {
        total_liability,
        amount_paid,
        refund_amount: delta.max(Decimal::ZERO),
        additional_due: (-delta).max(Decimal::ZERO),
        is_refund: delta > Decimal::ZERO,
    }
}
