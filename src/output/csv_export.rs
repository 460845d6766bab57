//! CSV export of the event store
//!
//! The export is a full snapshot: header row with the table's column names,
//! then every record in ascending id order. The destination is overwritten,
//! but only once the store has been read.

use crate::storage::{EventRecord, EventStore, EVENT_COLUMNS};
use crate::Result;
use csv::{Terminator, WriterBuilder};
use std::io::Write;
use std::path::Path;

/// Writes every stored event to `path`, replacing any existing file
///
/// # Returns
///
/// * `Ok(u64)` - Number of data rows written (header excluded)
/// * `Err(ScrapeError)` - Store read or file write failed
pub fn export_csv<S: EventStore + ?Sized>(storage: &S, path: &Path) -> Result<u64> {
    tracing::info!("Exporting events to {}", path.display());

    let events = storage.all_events()?;
    let file = std::fs::File::create(path)?;
    let rows = write_records(&events, file)?;

    tracing::info!("Exported {} events to {}", rows, path.display());
    Ok(rows)
}

/// Writes the header row and `events` as CSV to `writer`
fn write_records<W: Write>(events: &[EventRecord], writer: W) -> Result<u64> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(EVENT_COLUMNS)?;
    for event in events {
        wtr.serialize(event)?;
    }
    wtr.flush()?;

    Ok(events.len() as u64)
}
