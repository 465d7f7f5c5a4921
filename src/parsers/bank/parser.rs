use tracing::debug;

use super::{dto::StatementRow, types::StatementLayout};
use crate::{category::CategoryRules, parsers::traits::Parser, types::Transaction};

/// Parser for the fixed-layout bank statement export.
///
/// Parsing never fails as a whole: malformed rows are dropped and
/// unrecognized dates are passed through.
#[derive(Debug, Clone, Default)]
pub struct BankStatementParser {
    layout: StatementLayout,
    rules: CategoryRules,
}

impl BankStatementParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: StatementLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_rules(mut self, rules: CategoryRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn layout(&self) -> &StatementLayout {
        &self.layout
    }

    /// Data lines after the preamble, trimmed, blank lines removed.
    fn data_lines<'a>(&self, content: &'a str) -> impl Iterator<Item = (usize, &'a str)> {
        content
            .split('\n')
            .enumerate()
            .skip(self.layout.preamble_lines)
            .map(|(index, line)| (index, line.trim()))
            .filter(|(_, line)| !line.is_empty())
    }

    pub fn parse_rows(&self, content: &str) -> Vec<Transaction> {
        let mut transactions = Vec::new();
        let mut dropped = 0usize;

        for (index, line) in self.data_lines(content) {
            let fields = split_fields(line);

            let Some(row) = StatementRow::from_fields(&fields, &self.layout) else {
                debug!(line = index + 1, fields = fields.len(), "Dropping short statement row");
                dropped += 1;
                continue;
            };

            match row.into_transaction(&self.layout, &self.rules) {
                Ok(txn) => transactions.push(txn),
                Err(reason) => {
                    debug!(line = index + 1, %reason, "Dropping statement row");
                    dropped += 1;
                }
            }
        }

        debug!(
            parsed = transactions.len(),
            dropped, "Parsed bank statement transactions"
        );
        transactions
    }
}

impl Parser for BankStatementParser {
    type Output = Transaction;

    fn is_supported(&self, filename: Option<&str>, content: &str) -> bool {
        let has_csv_extension = filename
            .map(|name| name.to_lowercase().ends_with(".csv"))
            .unwrap_or(false);

        let has_data_row = self
            .data_lines(content)
            .any(|(_, line)| split_fields(line).len() >= self.layout.min_fields);

        match filename {
            Some(_) => has_csv_extension && has_data_row,
            None => has_data_row,
        }
    }

    fn parse(&self, content: &str) -> Result<Vec<Self::Output>, String> {
        Ok(self.parse_rows(content))
    }
}

/// Parses `content` with the default layout and category rules.
pub fn parse_statement(content: &str) -> Vec<Transaction> {
    BankStatementParser::default().parse_rows(content)
}

/// Splits a statement line on commas, ignoring commas inside double quotes.
///
/// Each `"` toggles the quoted state and is dropped from the output; a
/// doubled `""` is just two toggles, not an escaped quote. Fields are
/// trimmed.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
