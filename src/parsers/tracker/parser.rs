use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    category::Category,
    export::EXPORT_HEADER,
    parsers::traits::Parser,
    types::{Transaction, TransactionType},
};

/// Reads files produced by [`export_csv`](crate::export::export_csv).
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackerCsvParser;

impl TrackerCsvParser {
    fn header_line() -> String {
        EXPORT_HEADER.join(",")
    }
}

/// Field 0 is the date and the last three are amount, category and type.
/// Whatever sits in between is the description, which may itself have
/// contained commas when it was exported.
fn record_to_transaction(record: &StringRecord) -> Result<Transaction, String> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    let len = record.len();
    if len < EXPORT_HEADER.len() {
        return Err(format!("Line {}: expected {} fields, found {}", line, EXPORT_HEADER.len(), len));
    }

    let description = record
        .iter()
        .skip(1)
        .take(len - 4)
        .collect::<Vec<_>>()
        .join(",");

    let amount = Decimal::from_str(record[len - 3].trim())
        .map_err(|e| format!("Line {}: invalid amount '{}': {}", line, &record[len - 3], e))?;
    let category = Category::from_str(&record[len - 2]).map_err(|e| format!("Line {}: {}", line, e))?;
    let transaction_type =
        TransactionType::from_str(&record[len - 1]).map_err(|e| format!("Line {}: {}", line, e))?;

    Ok(Transaction::new(
        &record[0],
        description,
        amount,
        category,
        transaction_type,
    ))
}

impl Parser for TrackerCsvParser {
    type Output = Transaction;

    fn is_supported(&self, _filename: Option<&str>, content: &str) -> bool {
        content
            .lines()
            .next()
            .map(|first| first.trim() == Self::header_line())
            .unwrap_or(false)
    }

    fn parse(&self, content: &str) -> Result<Vec<Self::Output>, String> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(content.as_bytes());

        let mut transactions = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| format!("CSV read error: {}", e))?;
            transactions.push(record_to_transaction(&record)?);
        }

        debug!(parsed = transactions.len(), "Parsed exported transactions");
        Ok(transactions)
    }
}
