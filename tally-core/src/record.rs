//! Transaction record types shared by every stage of the pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Description used for balance-only records carried into the period.
pub const OPENING_BALANCE: &str = "Opening balance";

/// Date layout of every emitted record.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One normalized statement line.
///
/// `date` is kept as the zero-padded `DD/MM/YYYY` text so a record that
/// looks like a date but is not a calendar date still flows through; only
/// sequencing needs the calendar value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub description: String,
    /// Positive is a credit, negative a debit. `None` when the line carried
    /// no resolvable transaction amount.
    pub amount: Option<Money>,
    /// Running balance after this line.
    pub balance: Option<Money>,
}

impl TransactionRecord {
    /// A balance-only record describing the balance carried into the period.
    pub fn opening_balance(date: impl Into<String>, balance: Money) -> Self {
        Self {
            date: date.into(),
            description: OPENING_BALANCE.to_string(),
            amount: None,
            balance: Some(balance),
        }
    }

    pub fn is_opening_balance(&self) -> bool {
        self.description.to_lowercase().contains("opening balance")
    }

    /// Calendar value of `date`, if it is a real date.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

/// Credit/debit direction assigned by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    /// Apply the sign convention to an unsigned magnitude.
    pub fn sign(self, magnitude: Money) -> Money {
        match self {
            Direction::Credit => magnitude.abs(),
            Direction::Debit => -magnitude.abs(),
        }
    }
}

/// Boundary shape handed to serialization/display hosts: plain strings,
/// amounts and balances as two-decimal text, empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub balance: String,
}

impl From<&TransactionRecord> for StatementRow {
    fn from(r: &TransactionRecord) -> Self {
        Self {
            date: r.date.clone(),
            description: r.description.clone(),
            amount: r.amount.map(|m| m.to_string()).unwrap_or_default(),
            balance: r.balance.map(|m| m.to_string()).unwrap_or_default(),
        }
    }
}

/// Opening/closing figures a host shows next to the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BalanceSummary {
    pub count: usize,
    pub opening: Option<Money>,
    pub closing: Option<Money>,
}

impl BalanceSummary {
    /// Summarize an already sequenced record list.
    pub fn of(records: &[TransactionRecord]) -> Self {
        Self {
            count: records.len(),
            opening: records.first().and_then(|r| r.balance),
            closing: records.last().and_then(|r| r.balance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, desc: &str, amount: Option<i64>, balance: Option<i64>) -> TransactionRecord {
        TransactionRecord {
            date: date.to_string(),
            description: desc.to_string(),
            amount: amount.map(Money::from_cents),
            balance: balance.map(Money::from_cents),
        }
    }

    #[test]
    fn test_statement_row_formats_absent_as_empty() {
        let r = TransactionRecord::opening_balance("01/01/2023", Money::from_cents(80_000));
        let row = StatementRow::from(&r);
        assert_eq!(row.description, "Opening balance");
        assert_eq!(row.amount, "");
        assert_eq!(row.balance, "800.00");
    }

    #[test]
    fn test_opening_balance_detection_is_case_insensitive() {
        assert!(rec("01/01/2023", "OPENING BALANCE b/f", None, Some(1)).is_opening_balance());
        assert!(!rec("01/01/2023", "Closing balance", None, Some(1)).is_opening_balance());
    }

    #[test]
    fn test_calendar_date_rejects_impossible_dates() {
        assert!(rec("31/02/2023", "x", None, None).calendar_date().is_none());
        assert_eq!(
            rec("05/03/2023", "x", None, None).calendar_date(),
            NaiveDate::from_ymd_opt(2023, 3, 5)
        );
    }

    #[test]
    fn test_direction_sign() {
        let m = Money::from_cents(4_550);
        assert_eq!(Direction::Credit.sign(m), m);
        assert_eq!(Direction::Debit.sign(m), Money::from_cents(-4_550));
        assert_eq!(Direction::Debit.sign(-m), Money::from_cents(-4_550));
    }

    #[test]
    fn test_balance_summary() {
        let records = vec![
            rec("01/01/2023", "Opening balance", None, Some(80_000)),
            rec("01/01/2023", "Salary", Some(20_000), Some(100_000)),
            rec("02/01/2023", "Fee", Some(-500), Some(99_500)),
        ];
        let s = BalanceSummary::of(&records);
        assert_eq!(s.count, 3);
        assert_eq!(s.opening, Some(Money::from_cents(80_000)));
        assert_eq!(s.closing, Some(Money::from_cents(99_500)));
        assert_eq!(BalanceSummary::of(&[]), BalanceSummary::default());
    }
}
