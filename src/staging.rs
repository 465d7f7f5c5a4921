//! Staging buffer for parsed transactions awaiting confirmation.
//!
//! ```text
//! Idle --stage--> Previewing --commit--> Committing --> Idle
//!                     |                      |
//!                     +--cancel--> Idle      +--failed add--> Previewing (remainder kept)
//! ```

use tracing::{info, warn};

use crate::{
    errors::{TrackerError, TrackerResult},
    store::TransactionStore,
    types::Transaction,
};

/// Number of staged records shown in a preview.
pub const PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportState {
    #[default]
    Idle,
    Previewing,
    Committing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportPreview<'a> {
    pub rows: &'a [Transaction],
    /// Staged records not included in `rows`
    pub remaining: usize,
}

impl ImportPreview<'_> {
    pub fn total(&self) -> usize {
        self.rows.len() + self.remaining
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReport {
    pub committed: usize,
}

#[derive(Debug, Default)]
pub struct ImportSession {
    state: ImportState,
    pending: Vec<Transaction>,
    source_name: Option<String>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ImportState {
        self.state
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Name of the file the staged records came from, if any.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Replaces the buffer with `records`. Ids are stripped since staged
    /// records are not persisted yet. An empty parse leaves the session idle.
    pub fn stage(&mut self, records: Vec<Transaction>, source_name: Option<String>) -> ImportState {
        self.pending = records
            .into_iter()
            .map(|mut record| {
                record.id = None;
                record
            })
            .collect();

        if self.pending.is_empty() {
            self.reset();
        } else {
            self.source_name = source_name;
            self.state = ImportState::Previewing;
        }
        self.state
    }

    pub fn preview(&self) -> ImportPreview<'_> {
        let shown = self.pending.len().min(PREVIEW_LIMIT);
        ImportPreview {
            rows: &self.pending[..shown],
            remaining: self.pending.len() - shown,
        }
    }

    /// Persists every staged record with `store.add`, one at a time and in
    /// order.
    ///
    /// Stops at the first failed insert. Records already added are removed
    /// from the buffer and the rest stay staged, so confirming again picks
    /// up where this attempt stopped.
    pub fn commit<S>(&mut self, store: &mut S) -> TrackerResult<CommitReport>
    where
        S: TransactionStore + ?Sized,
    {
        if self.state != ImportState::Previewing {
            return Ok(CommitReport { committed: 0 });
        }

        self.state = ImportState::Committing;
        let mut committed = 0;
        let mut failure = None;

        for record in &self.pending {
            match store.add(record.clone()) {
                Ok(_) => committed += 1,
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        if let Some(source) = failure {
            warn!(committed, remaining = self.pending.len() - committed, error = %source, "Import interrupted");
            self.pending.drain(..committed);
            self.state = ImportState::Previewing;
            return Err(TrackerError::ImportInterrupted { committed, source });
        }

        info!(committed, source = ?self.source_name, "Import committed");
        self.reset();
        Ok(CommitReport { committed })
    }

    /// Discards the staged records without touching storage.
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.source_name = None;
        self.state = ImportState::Idle;
    }
}
