//! Storage module for persisting scraped events
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Appending event records, each committed individually
//! - Full-table reads for export

mod schema;
mod sqlite;
mod traits;

pub use schema::EVENT_COLUMNS;
pub use sqlite::SqliteStorage;
pub use traits::{EventStore, StorageError, StorageResult};

use crate::Result;
use serde::Serialize;
use std::path::Path;

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> Result<SqliteStorage> {
    SqliteStorage::new(path)
}

/// An event extracted from a page, not yet stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub venue: String,
    pub speakers: String,
    pub ticket_price: String,
    /// URL of the page the event was extracted from
    pub source: String,
}

/// Represents an event row in the database
///
/// Field order matches the table's column order; the CSV export relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub venue: String,
    pub speakers: String,
    pub ticket_price: String,
    pub source: String,
}
