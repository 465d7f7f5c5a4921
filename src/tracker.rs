//! Orchestration of user workflows over a transaction store.
//!
//! [`Tracker`] owns the staging session and borrows the store. Each user
//! action returns a [`Notification`] describing the outcome; failures are
//! reported, never raised, so a UI can show them and carry on.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    builder::ParserBuilder,
    category::{Category, CategoryRules},
    errors::{TrackerError, TrackerResult},
    export,
    parsers::prelude::StatementLayout,
    staging::{ImportPreview, ImportSession, ImportState},
    store::TransactionStore,
    summary::{self, Summary, TransactionFilter},
    types::Transaction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Notification {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    fn failure(context: &str, err: &TrackerError) -> Self {
        warn!(error = %err, "{}", context);
        Self::error(format!("{}: {}", context, err))
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

pub struct Tracker<'s, S: TransactionStore + ?Sized> {
    store: &'s mut S,
    session: ImportSession,
    layout: StatementLayout,
    rules: CategoryRules,
}

impl<'s, S: TransactionStore + ?Sized> Tracker<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Tracker {
            store,
            session: ImportSession::new(),
            layout: StatementLayout::default(),
            rules: CategoryRules::default(),
        }
    }

    pub fn with_layout(mut self, layout: StatementLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_rules(mut self, rules: CategoryRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules_mut(&mut self) -> &mut CategoryRules {
        &mut self.rules
    }

    fn parser(&self) -> ParserBuilder {
        ParserBuilder::new()
            .layout(self.layout.clone())
            .rules(self.rules.clone())
    }

    // ---- staged import -------------------------------------------------

    /// Reads and parses `path`, staging the result for confirmation.
    pub fn load_statement_file<P: AsRef<Path>>(&mut self, path: P) -> Notification {
        let path = path.as_ref();
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        match self.parser().filename(&path.to_string_lossy()).parse() {
            Ok(records) => self.stage(records, source),
            Err(err) => Notification::failure("Failed to process the CSV file", &err),
        }
    }

    /// Parses already-read file content and stages the result.
    pub fn load_statement(&mut self, content: &str, source_name: Option<&str>) -> Notification {
        let mut builder = self.parser().content(content);
        if let Some(name) = source_name {
            builder = builder.filename(name);
        }

        match builder.parse() {
            Ok(records) => self.stage(records, source_name.map(str::to_string)),
            Err(err) => Notification::failure("Failed to process the CSV file", &err),
        }
    }

    fn stage(&mut self, records: Vec<Transaction>, source: Option<String>) -> Notification {
        match self.session.stage(records, source) {
            ImportState::Previewing => Notification::info(format!(
                "{} transactions ready to import",
                self.session.pending().len()
            )),
            _ => Notification::warning("No transactions found in the file"),
        }
    }

    pub fn import_state(&self) -> ImportState {
        self.session.state()
    }

    pub fn preview(&self) -> ImportPreview<'_> {
        self.session.preview()
    }

    pub fn pending_import(&self) -> &[Transaction] {
        self.session.pending()
    }

    pub fn confirm_import(&mut self) -> Notification {
        if self.session.pending().is_empty() {
            return Notification::info("Nothing to import");
        }

        let total = self.session.pending().len();
        match self.session.commit(&mut *self.store) {
            Ok(report) => Notification::success(format!(
                "{} transactions imported successfully",
                report.committed
            )),
            Err(TrackerError::ImportInterrupted { committed, source }) => Notification::error(format!(
                "Import stopped after {} of {} transactions: {}",
                committed, total, source
            )),
            Err(err) => Notification::failure("Failed to import the transactions", &err),
        }
    }

    pub fn cancel_import(&mut self) -> Notification {
        self.session.cancel();
        Notification::info("Import cancelled")
    }

    // ---- single records ------------------------------------------------

    /// Stores a manually entered transaction. Any id on `record` is ignored.
    pub fn add_transaction(&mut self, mut record: Transaction) -> Notification {
        record.id = None;
        record.amount = record.amount.abs();
        match self.store.add(record) {
            Ok(id) => {
                info!(id, "Transaction added");
                Notification::success("Transaction added successfully")
            }
            Err(err) => Notification::failure("Failed to add the transaction", &TrackerError::from(err)),
        }
    }

    /// Loads a stored transaction for editing.
    pub fn transaction(&self, id: u64) -> TrackerResult<Option<Transaction>> {
        Ok(self.store.get(id)?)
    }

    /// Saves an edited transaction back under its id.
    pub fn save_transaction(&mut self, mut record: Transaction) -> Notification {
        if record.id.is_none() {
            return Notification::error("Cannot update a transaction without an id");
        }

        record.amount = record.amount.abs();
        match self.store.update(record) {
            Ok(id) => {
                info!(id, "Transaction updated");
                Notification::success("Transaction updated successfully")
            }
            Err(err) => Notification::failure("Failed to update the transaction", &TrackerError::from(err)),
        }
    }

    pub fn delete_transaction(&mut self, id: u64) -> Notification {
        match self.store.delete(id) {
            Ok(()) => Notification::success("Transaction deleted successfully"),
            Err(err) => Notification::failure("Failed to delete the transaction", &TrackerError::from(err)),
        }
    }

    pub fn clear_all(&mut self) -> Notification {
        match self.store.clear() {
            Ok(()) => Notification::info("All data has been deleted"),
            Err(err) => Notification::failure("Failed to clear the data", &TrackerError::from(err)),
        }
    }

    // ---- views ---------------------------------------------------------

    /// Stored transactions matching `filter`, newest first.
    pub fn transactions(&self, filter: &TransactionFilter) -> TrackerResult<Vec<Transaction>> {
        let mut records: Vec<Transaction> = self
            .store
            .get_all()?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();
        summary::sort_by_date_desc(&mut records);
        Ok(records)
    }

    pub fn summary(&self) -> TrackerResult<Summary> {
        Ok(Summary::from_transactions(&self.store.get_all()?))
    }

    pub fn expenses_by_category(&self) -> TrackerResult<Vec<(Category, Decimal)>> {
        Ok(summary::expenses_by_category(&self.store.get_all()?))
    }

    // ---- export --------------------------------------------------------

    pub fn export_csv(&self) -> TrackerResult<String> {
        export::export_csv(&self.store.get_all()?)
    }

    pub fn export_to_path<P: AsRef<Path>>(&self, path: P) -> Notification {
        let result = self
            .store
            .get_all()
            .map_err(TrackerError::from)
            .and_then(|records| export::export_to_path(path, &records));

        match result {
            Ok(()) => Notification::success("Data exported successfully"),
            Err(err) => Notification::failure("Failed to export the data", &err),
        }
    }
}
