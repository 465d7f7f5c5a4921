use std::{cmp::Ordering, collections::BTreeMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    category::Category,
    types::{Transaction, TransactionType},
};

/// Income, expense and balance totals over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Summary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expense) = transactions.into_iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), txn| match txn.transaction_type {
                TransactionType::Income => (income + txn.amount, expense),
                TransactionType::Expense => (income, expense + txn.amount),
            },
        );

        Summary {
            income,
            expense,
            balance: income - expense,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.balance < Decimal::ZERO
    }
}

/// Expense totals per category, in category order. Income is ignored and
/// categories without expenses are left out.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<(Category, Decimal)> {
    let mut totals: BTreeMap<Category, Decimal> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| !t.is_income()) {
        *totals.entry(txn.category).or_insert(Decimal::ZERO) += txn.amount;
    }
    totals.into_iter().collect()
}

/// Category and type filter for transaction listings. `None` matches anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub category: Option<Category>,
    pub transaction_type: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.category.is_none_or(|c| c == txn.category)
            && self.transaction_type.is_none_or(|t| t == txn.transaction_type)
    }
}

/// Newest first. Dates that are not valid `YYYY-MM-DD` go last, ordered by
/// their text. Equal dates keep their relative order.
pub fn sort_by_date_desc(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| match (a.date.to_naive().ok(), b.date.to_naive().ok()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.date.as_str().cmp(a.date.as_str()),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::dec;

    fn txn(date: &str, amount: Decimal, category: Category, transaction_type: TransactionType) -> Transaction {
        Transaction::new(date, format!("{} {}", category, date), amount, category, transaction_type)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("2024-03-01", dec!(1500), Category::Other, TransactionType::Income),
            txn("2024-03-05", dec!(4.50), Category::Transport, TransactionType::Expense),
            txn("2024-03-03", dec!(30.25), Category::Food, TransactionType::Expense),
            txn("2024-03-04", dec!(12), Category::Food, TransactionType::Expense),
            txn("2024-03-02", dec!(200), Category::BankFees, TransactionType::Income),
        ]
    }

    #[test]
    fn test_summary() {
        let summary = Summary::from_transactions(&sample());
        assert_eq!(summary.income, dec!(1700));
        assert_eq!(summary.expense, dec!(46.75));
        assert_eq!(summary.balance, dec!(1653.25));
        assert!(!summary.is_negative());
    }

    #[test]
    fn test_summary_negative_balance() {
        let txns = vec![
            txn("2024-03-01", dec!(10), Category::Other, TransactionType::Income),
            txn("2024-03-02", dec!(25.5), Category::Food, TransactionType::Expense),
        ];
        let summary = Summary::from_transactions(&txns);
        assert_eq!(summary.balance, dec!(-15.5));
        assert!(summary.is_negative());
    }

    #[test]
    fn test_summary_empty() {
        let txns: Vec<Transaction> = Vec::new();
        let summary = Summary::from_transactions(&txns);
        assert_eq!(summary, Summary::default());
        assert!(!summary.is_negative());
    }

    #[test]
    fn test_expenses_by_category() {
        let breakdown = expenses_by_category(&sample());
        assert_eq!(
            breakdown,
            vec![(Category::Transport, dec!(4.50)), (Category::Food, dec!(42.25))]
        );
    }

    #[rstest]
    #[case(TransactionFilter::new(), 5)]
    #[case(TransactionFilter::new().category(Category::Food), 2)]
    #[case(TransactionFilter::new().transaction_type(TransactionType::Income), 2)]
    #[case(TransactionFilter::new().category(Category::Food).transaction_type(TransactionType::Income), 0)]
    #[case(TransactionFilter::new().category(Category::Health), 0)]
    fn test_filter(#[case] filter: TransactionFilter, #[case] expected: usize) {
        assert_eq!(sample().iter().filter(|t| filter.matches(t)).count(), expected);
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut txns = sample();
        txns.push(txn("sin fecha", dec!(1), Category::Other, TransactionType::Expense));
        txns.insert(0, txn("2024-03-05", dec!(9), Category::Health, TransactionType::Expense));

        sort_by_date_desc(&mut txns);

        let dates: Vec<&str> = txns.iter().map(|t| t.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2024-03-05", "2024-03-05", "2024-03-04", "2024-03-03", "2024-03-02", "2024-03-01", "sin fecha"]
        );
        // stable for equal dates
        assert_eq!(txns[0].category, Category::Health);
    }
}
