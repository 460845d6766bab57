//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{EventRecord, NewEvent};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for event store implementations
///
/// The store is append-only: records are inserted one at a time, each insert
/// committed before it returns, and read back only as a full scan.
pub trait EventStore {
    /// Appends one event and returns its store-assigned id
    fn insert_event(&mut self, event: &NewEvent) -> StorageResult<i64>;

    /// Returns every stored event in ascending id order
    fn all_events(&self) -> StorageResult<Vec<EventRecord>>;

    /// Returns the number of stored events
    fn count_events(&self) -> StorageResult<u64>;
}
