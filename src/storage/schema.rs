//! Database schema definitions
//!
//! The event table is created if absent and never migrated.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per scraped event listing; no uniqueness beyond the surrogate id
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY,
    name TEXT,
    date TEXT,
    venue TEXT,
    speakers TEXT,
    ticket_price TEXT,
    source TEXT
);
"#;

/// Column names of the `events` table, in table order
pub const EVENT_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "date",
    "venue",
    "speakers",
    "ticket_price",
    "source",
];

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
