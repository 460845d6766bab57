//! Output module for exporting scraped data and reporting runs
//!
//! This module handles:
//! - Exporting the event store as CSV
//! - Summarizing a run for the terminal

mod csv_export;
mod summary;

pub use csv_export::export_csv;
pub use summary::{print_summary, RunSummary};
