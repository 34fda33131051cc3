//! vocab-deck - offline-first vocabulary flashcards
//!
//! The word list lives in a remote spreadsheet endpoint and is cached
//! locally. Writes are applied locally first and queued when the endpoint
//! cannot be reached; the queue is replayed on start and by `vocab sync`.
//!
//! [`app::VocabApp`] is the entry point for every operation.

pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod queue;
pub mod quiz;
pub mod reconcile;
pub mod remote;
pub mod settings;
pub mod store;
pub mod wotd;

// Re-export commonly used types
pub use app::{VocabApp, WordCounts, WordFilter, WriteOutcome};
pub use capabilities::{Capabilities, NoticeLevel, Notifier, Pronouncer};
pub use config::Config;
pub use error::{Result, VocabError};
pub use models::{PendingOperation, SyncStatus, WordEntry};
pub use queue::{FlushReport, OfflineQueue};
pub use remote::{HttpRemote, SheetRemote};
pub use store::LocalStore;
