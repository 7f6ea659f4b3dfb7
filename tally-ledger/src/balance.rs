//! Opening balance inferred from the first transaction when the statement
//! never states one.

use tally_core::{Money, TransactionRecord};

/// Balance before the first record: its balance minus its own amount.
/// Only a positive result is trusted.
pub fn infer_opening_balance(first: &TransactionRecord) -> Option<TransactionRecord> {
    let balance = first.balance?;
    let candidate = balance - first.amount.unwrap_or(Money::ZERO);
    if !candidate.is_positive() {
        log::debug!("inferred opening balance {candidate} is not positive, skipping");
        return None;
    }
    Some(TransactionRecord::opening_balance(first.date.clone(), candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(amount: Option<i64>, balance: Option<i64>) -> TransactionRecord {
        TransactionRecord {
            date: "02/01/2023".into(),
            description: "Salary".into(),
            amount: amount.map(Money::from_cents),
            balance: balance.map(Money::from_cents),
        }
    }

    #[test]
    fn test_credit_is_subtracted() {
        let o = infer_opening_balance(&rec(Some(20_000), Some(100_000))).unwrap();
        assert_eq!(o.balance, Some(Money::from_cents(80_000)));
        assert_eq!(o.amount, None);
        assert_eq!(o.date, "02/01/2023");
        assert!(o.is_opening_balance());
    }

    #[test]
    fn test_debit_is_added_back() {
        let o = infer_opening_balance(&rec(Some(-4_550), Some(100_448))).unwrap();
        assert_eq!(o.balance, Some(Money::from_cents(104_998)));
    }

    #[test]
    fn test_absent_amount_uses_balance() {
        let o = infer_opening_balance(&rec(None, Some(5_000))).unwrap();
        assert_eq!(o.balance, Some(Money::from_cents(5_000)));
    }

    #[test]
    fn test_non_positive_or_missing_balance_is_skipped() {
        assert!(infer_opening_balance(&rec(Some(100_000), Some(100_000))).is_none());
        assert!(infer_opening_balance(&rec(Some(200_000), Some(100_000))).is_none());
        assert!(infer_opening_balance(&rec(Some(100), None)).is_none());
    }
}
