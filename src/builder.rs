use std::fs;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    category::CategoryRules,
    errors::{TrackerError, TrackerResult},
    parsers::prelude::*,
    types::Transaction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// Fixed-layout bank statement export
    #[serde(rename = "bank_statement")]
    BankStatement,
    /// This crate's own `date,description,amount,category,type` export
    #[serde(rename = "tracker_csv")]
    TrackerCsv,
}

impl FileFormat {
    fn parse(&self, content: &str, bank: &BankStatementParser) -> TrackerResult<Vec<Transaction>> {
        let result = match self {
            FileFormat::BankStatement => bank.parse(content),
            FileFormat::TrackerCsv => TrackerCsvParser.parse(content),
        };
        result.map_err(TrackerError::ParseFailed)
    }

    fn detect(
        filename: Option<&str>,
        content: Option<&str>,
        bank: &BankStatementParser,
    ) -> TrackerResult<Self> {
        if let Some(content) = content {
            if TrackerCsvParser.is_supported(filename, content) {
                return Ok(FileFormat::TrackerCsv);
            }
            if bank.is_supported(None, content) {
                return Ok(FileFormat::BankStatement);
            }
        }

        if let Some(filename) = filename {
            if filename.to_lowercase().ends_with(".csv") {
                return Ok(FileFormat::BankStatement);
            }
        }

        Err(TrackerError::UnsupportedFormat)
    }
}

/// Reads and parses a transaction file.
///
/// ```rust,ignore
/// let transactions = ParserBuilder::new()
///     .filename("movimientos.csv")
///     .parse()?;
/// ```
#[derive(Default)]
pub struct ParserBuilder {
    content: Option<String>,
    filepath: Option<String>,
    format: Option<FileFormat>,
    layout: Option<StatementLayout>,
    rules: Option<CategoryRules>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn layout(mut self, layout: StatementLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn rules(mut self, rules: CategoryRules) -> Self {
        self.rules = Some(rules);
        self
    }

    fn bank_parser(&self) -> BankStatementParser {
        BankStatementParser::new()
            .with_layout(self.layout.clone().unwrap_or_default())
            .with_rules(self.rules.clone().unwrap_or_default())
    }

    /// Content given directly wins over the file path. A file that cannot be
    /// read fails the whole parse.
    pub fn parse(self) -> TrackerResult<Vec<Transaction>> {
        let bank = self.bank_parser();

        let content = match self.content {
            Some(content) => content,
            None => {
                let path = self
                    .filepath
                    .as_deref()
                    .ok_or(TrackerError::MissingContentAndFilepath)?;
                fs::read_to_string(path)?
            }
        };

        let format = match self.format {
            Some(format) => format,
            None => FileFormat::detect(self.filepath.as_deref(), Some(&content), &bank)?,
        };

        debug!(?format, file = ?self.filepath, "Parsing transactions");
        format.parse(&content, &bank)
    }
}
