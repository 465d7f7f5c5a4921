use thiserror::Error;

/// Failures reported by a [`TransactionStore`](crate::store::TransactionStore).
///
/// One variant per store operation so callers can tell which step failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Failed to add transaction: {0}")]
    Add(String),

    #[error("Failed to update transaction: {0}")]
    Update(String),

    #[error("Failed to get transaction: {0}")]
    Get(String),

    #[error("Failed to get transactions: {0}")]
    GetAll(String),

    #[error("Failed to delete transaction: {0}")]
    Delete(String),

    #[error("Failed to clear transactions: {0}")]
    Clear(String),

    /// `add` was given an explicit id that is already taken
    #[error("Transaction id {0} already exists")]
    DuplicateKey(u64),
}

/// Errors produced while importing, exporting or managing transactions
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Generic parsing failure (detail in the message)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// Content matches none of the supported formats
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// The file could not be read from disk
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// The builder was called without content or a file path
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// Date is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Unknown transaction type: {0}")]
    InvalidTransactionType(String),

    /// A layout or rules file is not valid JSON for the expected shape
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A bulk import stopped at a failed insert; `committed` records made it in
    #[error("Import stopped after {committed} transactions: {source}")]
    ImportInterrupted {
        committed: usize,
        source: StorageError,
    },
}

/// Convenience alias for results carrying [`TrackerError`]
pub type TrackerResult<T> = Result<T, TrackerError>;
