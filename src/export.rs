//! CSV export of stored transactions.
//!
//! The output is deliberately simple: a fixed header and the five fields
//! joined by commas with no quoting, so a description containing a comma
//! spreads over several columns. [`TrackerCsvParser`](crate::TrackerCsvParser)
//! reads it back by anchoring on the first and last columns.

use std::{fs::File, io, path::Path};

use csv::{QuoteStyle, Writer, WriterBuilder};

use crate::{
    errors::{TrackerError, TrackerResult},
    types::Transaction,
};

pub const EXPORT_HEADER: [&str; 5] = ["date", "description", "amount", "category", "type"];

pub const DEFAULT_EXPORT_FILENAME: &str = "transactions.csv";

fn export_error(err: impl std::fmt::Display) -> TrackerError {
    TrackerError::ExportFailed(err.to_string())
}

fn writer<W: io::Write>(inner: W) -> Writer<W> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(inner)
}

fn write_records<W: io::Write>(wtr: &mut Writer<W>, transactions: &[Transaction]) -> TrackerResult<()> {
    wtr.write_record(EXPORT_HEADER).map_err(export_error)?;

    for txn in transactions {
        let amount = txn.amount.to_string();
        wtr.write_record([
            txn.date.as_str(),
            txn.description.as_str(),
            amount.as_str(),
            txn.category.label(),
            txn.transaction_type.as_str(),
        ])
        .map_err(export_error)?;
    }

    wtr.flush().map_err(export_error)
}

/// Writes the export to any writer, in the order given.
pub fn write_csv<W: io::Write>(inner: W, transactions: &[Transaction]) -> TrackerResult<()> {
    let mut wtr = writer(inner);
    write_records(&mut wtr, transactions)
}

/// Returns the export as text.
pub fn export_csv(transactions: &[Transaction]) -> TrackerResult<String> {
    let mut wtr = writer(Vec::new());
    write_records(&mut wtr, transactions)?;

    let bytes = wtr.into_inner().map_err(export_error)?;
    String::from_utf8(bytes).map_err(export_error)
}

pub fn export_to_path<P: AsRef<Path>>(path: P, transactions: &[Transaction]) -> TrackerResult<()> {
    let file = File::create(path.as_ref()).map_err(export_error)?;
    write_csv(file, transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{category::Category, types::TransactionType};
    use rust_decimal::dec;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new("2024-03-05", "UBER TRIP", dec!(4.50), Category::Transport, TransactionType::Expense),
            Transaction::new("2024-03-06", "PAGO, LUZ", dec!(23), Category::HouseholdServices, TransactionType::Expense)
                .with_id(2),
            Transaction::new("2024-03-07", "NOMINA", dec!(1200.00), Category::Other, TransactionType::Income),
        ]
    }

    #[test]
    fn test_export_csv() {
        let csv = export_csv(&sample()).unwrap();
        let expected = "date,description,amount,category,type\n\
2024-03-05,UBER TRIP,4.50,Transport,expense\n\
2024-03-06,PAGO, LUZ,23,Household Services,expense\n\
2024-03-07,NOMINA,1200.00,Other,income\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_export_empty_has_header_only() {
        assert_eq!(export_csv(&[]).unwrap(), "date,description,amount,category,type\n");
    }

    #[test]
    fn test_export_applies_no_quoting() {
        let txns = vec![Transaction::new(
            "2024-03-05",
            "Say \"hi\"",
            dec!(1),
            Category::Other,
            TransactionType::Expense,
        )];
        let csv = export_csv(&txns).unwrap();
        assert!(csv.contains("2024-03-05,Say \"hi\",1,Other,expense"));
    }

    #[test]
    fn test_write_csv_to_buffer() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &sample()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), export_csv(&sample()).unwrap());
    }

    #[test]
    fn test_export_to_path() {
        let path = std::env::temp_dir().join(format!("export-test-{}.csv", std::process::id()));
        export_to_path(&path, &sample()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(written.starts_with("date,description,amount,category,type\n"));
        assert_eq!(written.lines().count(), 4);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let path = std::env::temp_dir().join("no-such-dir-for-export").join("out.csv");
        assert!(matches!(export_to_path(&path, &sample()), Err(TrackerError::ExportFailed(_))));
    }
}
