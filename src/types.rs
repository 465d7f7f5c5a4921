use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{category::Category, errors::TrackerError};

/// Direction of a transaction. The amount itself is always a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(TrackerError::InvalidTransactionType(s.to_string())),
        }
    }
}

/// Transaction date in its stored string form.
///
/// Normally a zero-padded `YYYY-MM-DD`. Dates that could not be normalized
/// on import are kept verbatim, so this is not guaranteed to be a valid
/// calendar date; use [`TransactionDate::to_naive`] to check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionDate(String);

impl TransactionDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_naive(&self) -> Result<NaiveDate, TrackerError> {
        NaiveDate::parse_from_str(self.0.trim(), "%Y-%m-%d")
            .map_err(|_| TrackerError::InvalidDate(self.0.clone()))
    }
}

impl From<String> for TransactionDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TransactionDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<NaiveDate> for TransactionDate {
    fn from(value: NaiveDate) -> Self {
        Self(value.format("%Y-%m-%d").to_string())
    }
}

impl fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned by the store; `None` until the record is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub date: TransactionDate,
    pub description: String,
    /// Non-negative magnitude. The sign lives in `transaction_type`.
    pub amount: Decimal,
    pub category: Category,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// Builds an unpersisted transaction. Any sign on `amount` is dropped.
    pub fn new(
        date: impl Into<TransactionDate>,
        description: impl Into<String>,
        amount: Decimal,
        category: Category,
        transaction_type: TransactionType,
    ) -> Self {
        Transaction {
            id: None,
            date: date.into(),
            description: description.into(),
            amount: amount.abs(),
            category,
            transaction_type,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// Amount with two decimals, prefixed with `-` for expenses: `-$12.50`.
    pub fn display_amount(&self) -> String {
        let sign = match self.transaction_type {
            TransactionType::Expense => "-",
            TransactionType::Income => "",
        };
        format!("{}${:.2}", sign, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::dec;

    fn sample() -> Transaction {
        Transaction::new(
            "2024-03-05",
            "Farmacia Fybeca",
            dec!(-12.5),
            Category::Health,
            TransactionType::Expense,
        )
    }

    #[test]
    fn test_new_drops_sign() {
        let txn = sample();
        assert_eq!(txn.amount, dec!(12.5));
        assert!(txn.id.is_none());
    }

    #[rstest]
    #[case(TransactionType::Expense, dec!(12.5), "-$12.50")]
    #[case(TransactionType::Income, dec!(1500), "$1500.00")]
    #[case(TransactionType::Expense, dec!(0.333), "-$0.33")]
    fn test_display_amount(
        #[case] transaction_type: TransactionType,
        #[case] amount: Decimal,
        #[case] expected: &str,
    ) {
        let txn = Transaction::new("2024-01-01", "x", amount, Category::Other, transaction_type);
        assert_eq!(txn.display_amount(), expected);
    }

    #[rstest]
    #[case("income", TransactionType::Income)]
    #[case("expense", TransactionType::Expense)]
    #[case(" Income ", TransactionType::Income)]
    fn test_transaction_type_from_str(#[case] input: &str, #[case] expected: TransactionType) {
        assert_eq!(input.parse::<TransactionType>().unwrap(), expected);
    }

    #[test]
    fn test_transaction_type_rejects_unknown() {
        assert!(matches!(
            "gasto".parse::<TransactionType>(),
            Err(TrackerError::InvalidTransactionType(_))
        ));
    }

    #[rstest]
    #[case("2024-03-05", true)]
    #[case("2024-02-30", false)]
    #[case("05/03/2024", false)]
    #[case("", false)]
    fn test_date_to_naive(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(TransactionDate::from(input).to_naive().is_ok(), valid);
    }

    #[test]
    fn test_date_from_naive_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(TransactionDate::from(date).as_str(), "2024-03-05");
    }

    #[test]
    fn test_transaction_serialization() {
        let txn = sample();
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
        assert!(json.contains("\"category\":\"Health\""));
        assert!(json.contains("\"date\":\"2024-03-05\""));
        assert!(!json.contains("\"id\""));

        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, txn);
    }

    #[test]
    fn test_persisted_transaction_keeps_id() {
        let txn = sample().with_id(7);
        let json = serde_json::to_string(&txn).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, Some(7));
    }
}
