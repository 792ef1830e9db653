//! # Temporal Types — Financial Years and Statutory Dates
//!
//! The Indian financial year runs 1 April to 31 March and is written
//! "YYYY-YY" ("2023-24"). Every statutory calendar date the engine needs —
//! advance-tax installment due dates, the return filing due date, the start
//! of the assessment year — is derived from the [`FinancialYear`] value, so
//! no date constant is ever duplicated in computation code.
//!
//! Interest periods under Sections 234A/B/C count a part month as a full
//! month; [`charged_months`] implements that counting rule in one place.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An Indian financial year, e.g. "2023-24" (1 April 2023 – 31 March 2024).
///
/// The configuration key for every statutory table. Validated at
/// construction: four-digit start year, two-digit end suffix, consecutive
/// years, and a start year no earlier than 1961 (the Income-tax Act).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FinancialYear(String);

impl FinancialYear {
    /// Create a financial year from a "YYYY-YY" string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFinancialYear`] if the string is
    /// not of the form `YYYY-YY`, the years are not consecutive, or the
    /// start year is out of range.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let (start, suffix) = match s.split_once('-') {
            Some(parts) => parts,
            None => return Err(ValidationError::InvalidFinancialYear(s)),
        };
        if start.len() != 4 || suffix.len() != 2 {
            return Err(ValidationError::InvalidFinancialYear(s));
        }
        let start_year: i32 = match start.parse() {
            Ok(y) => y,
            Err(_) => return Err(ValidationError::InvalidFinancialYear(s)),
        };
        let end_suffix: i32 = match suffix.parse() {
            Ok(y) => y,
            Err(_) => return Err(ValidationError::InvalidFinancialYear(s)),
        };
        if !(1961..=2099).contains(&start_year) || (start_year + 1) % 100 != end_suffix {
            return Err(ValidationError::InvalidFinancialYear(s));
        }
        Ok(Self(s))
    }

    /// The "YYYY-YY" label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar year the financial year starts in (2023 for "2023-24").
    pub fn start_year(&self) -> i32 {
        // Safe by construction: validated to a 4-digit prefix.
        self.0[..4].parse().unwrap_or(0)
    }

    /// First day of the financial year (1 April).
    pub fn start_date(&self) -> NaiveDate {
        statutory_date(self.start_year(), 4, 1)
    }

    /// Last day of the financial year (31 March of the following year).
    pub fn end_date(&self) -> NaiveDate {
        statutory_date(self.start_year() + 1, 3, 31)
    }

    /// The assessment year label ("2024-25" for financial year "2023-24").
    pub fn assessment_year(&self) -> String {
        let ay_start = self.start_year() + 1;
        format!("{}-{:02}", ay_start, (ay_start + 1) % 100)
    }

    /// First day of the assessment year (1 April following the financial
    /// year). Section 234B interest runs from this date.
    pub fn assessment_year_start(&self) -> NaiveDate {
        statutory_date(self.start_year() + 1, 4, 1)
    }

    /// Due date for filing the return: 31 July of the assessment year
    /// (non-audit individual taxpayers).
    pub fn filing_due_date(&self) -> NaiveDate {
        statutory_date(self.start_year() + 1, 7, 31)
    }

    /// Advance-tax installment due dates: 15 June, 15 September,
    /// 15 December of the financial year and 15 March of the following
    /// calendar year. Section 234C checkpoints, in quarter order.
    pub fn advance_tax_due_dates(&self) -> [NaiveDate; 4] {
        let y = self.start_year();
        [
            statutory_date(y, 6, 15),
            statutory_date(y, 9, 15),
            statutory_date(y, 12, 15),
            statutory_date(y + 1, 3, 15),
        ]
    }
}

impl std::fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Construct a fixed statutory date. The (month, day) pairs used in this
/// module are all valid for every year, so this cannot fail in practice;
/// the fallback keeps the function total without a panic path.
fn statutory_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default())
}

/// Number of months charged for the interest period from `from` to `to`,
/// where a part month counts as a full month.
///
/// Returns 0 when `to <= from` (nothing overdue). One day past `from` is
/// already one chargeable month.
pub fn charged_months(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }
    let whole =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    let months = if to.day() > from.day() { whole + 1 } else { whole };
    months.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- FinancialYear construction --

    #[test]
    fn financial_year_valid() {
        let fy = FinancialYear::new("2023-24").unwrap();
        assert_eq!(fy.as_str(), "2023-24");
        assert_eq!(fy.start_year(), 2023);
    }

    #[test]
    fn financial_year_century_wrap() {
        let fy = FinancialYear::new("2099-00").unwrap();
        assert_eq!(fy.start_year(), 2099);
    }

    #[test]
    fn financial_year_non_consecutive_rejected() {
        assert!(FinancialYear::new("2023-25").is_err());
        assert!(FinancialYear::new("2023-23").is_err());
    }

    #[test]
    fn financial_year_malformed_rejected() {
        assert!(FinancialYear::new("2023/24").is_err());
        assert!(FinancialYear::new("23-24").is_err());
        assert!(FinancialYear::new("2023-2024").is_err());
        assert!(FinancialYear::new("").is_err());
        assert!(FinancialYear::new("1947-48").is_err());
    }

    // -- Statutory dates --

    #[test]
    fn statutory_dates_for_2023_24() {
        let fy = FinancialYear::new("2023-24").unwrap();
        assert_eq!(fy.start_date(), date(2023, 4, 1));
        assert_eq!(fy.end_date(), date(2024, 3, 31));
        assert_eq!(fy.assessment_year(), "2024-25");
        assert_eq!(fy.assessment_year_start(), date(2024, 4, 1));
        assert_eq!(fy.filing_due_date(), date(2024, 7, 31));
    }

    #[test]
    fn advance_tax_due_dates_in_quarter_order() {
        let fy = FinancialYear::new("2023-24").unwrap();
        let dues = fy.advance_tax_due_dates();
        assert_eq!(dues[0], date(2023, 6, 15));
        assert_eq!(dues[1], date(2023, 9, 15));
        assert_eq!(dues[2], date(2023, 12, 15));
        assert_eq!(dues[3], date(2024, 3, 15));
        assert!(dues.windows(2).all(|w| w[0] < w[1]));
    }

    // -- charged_months --

    #[test]
    fn charged_months_zero_when_not_late() {
        let due = date(2024, 7, 31);
        assert_eq!(charged_months(due, due), 0);
        assert_eq!(charged_months(due, date(2024, 7, 1)), 0);
    }

    #[test]
    fn charged_months_one_day_late_is_one_month() {
        assert_eq!(charged_months(date(2024, 7, 31), date(2024, 8, 1)), 1);
    }

    #[test]
    fn charged_months_exact_month_boundary() {
        assert_eq!(charged_months(date(2024, 7, 31), date(2024, 8, 31)), 1);
        assert_eq!(charged_months(date(2024, 7, 31), date(2024, 9, 1)), 2);
    }

    #[test]
    fn charged_months_april_to_july_filing() {
        // Section 234B window: 1 April to 31 July spans four charged months
        // (April, May, June, July).
        assert_eq!(charged_months(date(2024, 4, 1), date(2024, 7, 31)), 4);
    }

    #[test]
    fn charged_months_across_year_boundary() {
        assert_eq!(charged_months(date(2023, 12, 15), date(2024, 1, 16)), 2);
    }
}
