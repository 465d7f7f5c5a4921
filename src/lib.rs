//! Personal finance tracker core: bank statement import, categorization,
//! staged confirmation, storage contract, summaries and CSV export.
//!
//! ```rust,ignore
//! use expense_tracker_rs::{MemoryStore, Tracker};
//!
//! let mut store = MemoryStore::new();
//! let mut tracker = Tracker::new(&mut store);
//!
//! tracker.load_statement_file("movimientos.csv");
//! let preview = tracker.preview();
//! tracker.confirm_import();
//! ```

mod builder;
mod types;

pub mod category;
pub mod errors;
pub mod export;
pub mod parsers;
pub mod staging;
pub mod store;
pub mod summary;
pub mod tracker;

pub use builder::{FileFormat, ParserBuilder};
pub use category::{Category, CategoryRule, CategoryRules, categorize};
pub use errors::{StorageError, TrackerError, TrackerResult};
pub use parsers::prelude::*;
pub use staging::{CommitReport, ImportPreview, ImportSession, ImportState, PREVIEW_LIMIT};
pub use store::{MemoryStore, TransactionStore};
pub use summary::{Summary, TransactionFilter};
pub use tracker::{Notification, NotificationLevel, Tracker};
pub use types::{Transaction, TransactionDate, TransactionType};
