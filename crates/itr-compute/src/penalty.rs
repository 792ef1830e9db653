//! # Advance-Tax Interest — Sections 234A/B/C
//!
//! Interest for late filing (234A), for underpaid advance tax across the
//! year (234B), and for per-installment shortfalls against the cumulative
//! checkpoints (234C). The three charges are independent and sum
//! additively; none reduces another.
//!
//! All three sections charge simple interest at 1% per month, a part month
//! counting as a full month (`itr_core::charged_months`). Due dates are
//! derived from the financial year; no date constant lives here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use itr_core::money::{clamp_non_negative, percent_of, round_rupees};
use itr_core::{charged_months, FinancialYear};

/// Monthly simple-interest rate for all three sections, in percent.
const MONTHLY_RATE_PERCENT: Decimal = Decimal::ONE;

/// Cumulative share of the liability due by each installment, in percent:
/// 15% by 15 June, 45% by 15 September, 75% by 15 December, 100% by
/// 15 March.
const CUMULATIVE_DUE_PERCENT: [u32; 4] = [15, 45, 75, 100];

/// Months charged per installment shortfall: three months each for the
/// first three checkpoints, one for the final one.
const QUARTER_MONTHS: [u32; 4] = [3, 3, 3, 1];

/// Inputs to the interest computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyInputs {
    /// Assessed total tax liability for the year (post-cess).
    pub total_liability: Decimal,
    /// TDS credit for the year. Advance-tax obligations apply to the
    /// liability net of TDS.
    pub tds_credit: Decimal,
    /// Advance tax paid per installment, in due-date order.
    pub quarterly_advance_tax: [Decimal; 4],
    /// Financial year, from which every due date derives.
    pub financial_year: FinancialYear,
    /// Actual filing date of the return.
    pub filing_date: NaiveDate,
}

/// One installment checkpoint's shortfall and interest under Section 234C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyShortfall {
    /// Installment number, 1-based.
    pub quarter: u8,
    /// Statutory due date of the installment.
    pub due_date: NaiveDate,
    /// Cumulative advance tax required by the due date.
    pub required_cumulative: Decimal,
    /// Cumulative advance tax actually paid by the due date.
    pub paid_cumulative: Decimal,
    /// Shortfall against the requirement (never negative; excess is not
    /// carried into other checkpoints as a credit here).
    pub shortfall: Decimal,
    /// Months of interest charged for this checkpoint.
    pub months_charged: u32,
    /// Interest for this checkpoint, full precision.
    pub interest: Decimal,
}

/// Interest charges under Sections 234A, 234B, and 234C, plus the
/// aggregate. Each section total is rounded to whole rupees; the aggregate
/// is the sum of the rounded sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceTaxPenalty {
    /// Section 234A: late-filing interest.
    pub section_234a: Decimal,
    /// Section 234B: interest for advance tax below 90% of the assessed
    /// liability.
    pub section_234b: Decimal,
    /// Section 234C: per-installment shortfall interest.
    pub section_234c: Decimal,
    /// Per-installment detail behind the 234C total.
    pub quarterly_shortfalls: Vec<QuarterlyShortfall>,
    /// Sum of the three sections.
    pub total: Decimal,
}

/// Compute interest under all three sections.
///
/// Pure: the filing date is an input, not a clock read. Negative inputs
/// are clamped to zero. A liability fully covered by TDS attracts no
/// interest under any section.
pub fn compute_interest(inputs: &PenaltyInputs) -> AdvanceTaxPenalty {
    let liability = clamp_non_negative(inputs.total_liability);
    let tds = clamp_non_negative(inputs.tds_credit);
    let assessed_tax = clamp_non_negative(liability - tds);

    let paid: Vec<Decimal> = inputs
        .quarterly_advance_tax
        .iter()
        .copied()
        .map(clamp_non_negative)
        .collect();
    let advance_paid_total: Decimal = paid.iter().copied().sum();

    let section_234a = late_filing_interest(
        assessed_tax,
        advance_paid_total,
        &inputs.financial_year,
        inputs.filing_date,
    );
    let section_234b = assessed_shortfall_interest(
        assessed_tax,
        advance_paid_total,
        &inputs.financial_year,
        inputs.filing_date,
    );
    let (section_234c, quarterly_shortfalls) =
        installment_shortfall_interest(assessed_tax, &paid, &inputs.financial_year);

    AdvanceTaxPenalty {
        section_234a,
        section_234b,
        section_234c,
        quarterly_shortfalls,
        total: section_234a + section_234b + section_234c,
    }
}

/// Section 234A: 1%/month on the unpaid balance, from the filing due date
/// to the actual filing date. Zero when filed on time or nothing is unpaid.
fn late_filing_interest(
    assessed_tax: Decimal,
    advance_paid_total: Decimal,
    financial_year: &FinancialYear,
    filing_date: NaiveDate,
) -> Decimal {
    let unpaid = clamp_non_negative(assessed_tax - advance_paid_total);
    let months = charged_months(financial_year.filing_due_date(), filing_date);
    if months == 0 || unpaid == Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_rupees(percent_of(unpaid, MONTHLY_RATE_PERCENT) * Decimal::from(months))
}

/// Section 234B: applies only when advance tax paid is below 90% of the
/// assessed liability; 1%/month on the full shortfall from 1 April of the
/// assessment year to the filing date.
fn assessed_shortfall_interest(
    assessed_tax: Decimal,
    advance_paid_total: Decimal,
    financial_year: &FinancialYear,
    filing_date: NaiveDate,
) -> Decimal {
    let required = percent_of(assessed_tax, Decimal::from(90));
    if advance_paid_total >= required || assessed_tax == Decimal::ZERO {
        return Decimal::ZERO;
    }
    let shortfall = clamp_non_negative(assessed_tax - advance_paid_total);
    let months = charged_months(financial_year.assessment_year_start(), filing_date);
    round_rupees(percent_of(shortfall, MONTHLY_RATE_PERCENT) * Decimal::from(months))
}

/// Section 234C: each checkpoint's shortfall against the cumulative
/// requirement is charged independently — no netting across checkpoints,
/// no negative shortfall carried forward.
fn installment_shortfall_interest(
    assessed_tax: Decimal,
    paid: &[Decimal],
    financial_year: &FinancialYear,
) -> (Decimal, Vec<QuarterlyShortfall>) {
    let due_dates = financial_year.advance_tax_due_dates();
    let mut paid_cumulative = Decimal::ZERO;
    let mut total = Decimal::ZERO;
    let mut quarterly = Vec::with_capacity(4);

    for quarter in 0..4 {
        paid_cumulative += paid.get(quarter).copied().unwrap_or(Decimal::ZERO);
        let required_cumulative =
            percent_of(assessed_tax, Decimal::from(CUMULATIVE_DUE_PERCENT[quarter]));
        let shortfall = clamp_non_negative(required_cumulative - paid_cumulative);
        let months_charged = QUARTER_MONTHS[quarter];
        let interest =
            percent_of(shortfall, MONTHLY_RATE_PERCENT) * Decimal::from(months_charged);
        total += interest;

        quarterly.push(QuarterlyShortfall {
            quarter: (quarter + 1) as u8,
            due_date: due_dates[quarter],
            required_cumulative,
            paid_cumulative,
            shortfall,
            months_charged,
            interest,
        });
    }

    (round_rupees(total), quarterly)
}
