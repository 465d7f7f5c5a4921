use crate::{
    category::CategoryRules,
    types::{Transaction, TransactionType},
};

use super::types::{StatementLayout, normalize_amount, normalize_date};

/// Positional fields of one accepted statement line, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRow {
    pub date: String,
    pub place: String,
    pub detail: String,
    pub sign: String,
    pub amount: String,
}

impl StatementRow {
    /// Returns `None` when the line has fewer fields than the layout requires.
    pub fn from_fields(fields: &[String], layout: &StatementLayout) -> Option<Self> {
        if fields.len() < layout.min_fields {
            return None;
        }

        let field = |index: usize| fields.get(index).cloned().unwrap_or_default();

        Some(StatementRow {
            date: field(layout.date_column),
            place: field(layout.place_column),
            detail: field(layout.detail_column),
            sign: field(layout.sign_column),
            amount: field(layout.amount_column),
        })
    }

    pub fn transaction_type(&self, layout: &StatementLayout) -> TransactionType {
        if self.sign.trim() == layout.income_marker {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }

    /// Detail, then place, then the layout's placeholder.
    pub fn description<'a>(&'a self, layout: &'a StatementLayout) -> &'a str {
        [self.detail.as_str(), self.place.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(layout.fallback_description.as_str())
    }

    pub fn into_transaction(
        self,
        layout: &StatementLayout,
        rules: &CategoryRules,
    ) -> Result<Transaction, String> {
        let amount = normalize_amount(&self.amount)?;
        let description = self.description(layout).to_string();
        let category = rules.categorize(&description);

        Ok(Transaction::new(
            normalize_date(&self.date),
            description,
            amount,
            category,
            self.transaction_type(layout),
        ))
    }
}
