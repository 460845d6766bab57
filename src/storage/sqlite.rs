//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the EventStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{EventStore, StorageResult};
use crate::storage::{EventRecord, NewEvent};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database file and ensures the schema exists
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(ScrapeError)` - Failed to open database
    pub fn new(path: &Path) -> crate::Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        tracing::debug!("Opened event store at {}", path.display());
        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> crate::Result<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl EventStore for SqliteStorage {
    fn insert_event(&mut self, event: &NewEvent) -> StorageResult<i64> {
        self.conn.execute(
            "INSERT INTO events (name, date, venue, speakers, ticket_price, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                event.name,
                event.date,
                event.venue,
                event.speakers,
                event.ticket_price,
                event.source
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn all_events(&self) -> StorageResult<Vec<EventRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, date, venue, speakers, ticket_price, source
             FROM events ORDER BY id ASC",
        )?;

        let events = stmt
            .query_map([], |row| {
                Ok(EventRecord {
                    id: row.get(0)?,
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    date: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    venue: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    speakers: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    ticket_price: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    source: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    fn count_events(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
