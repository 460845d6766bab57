//! Run summary reporting
//!
//! Collects the per-site reports of one run and prints them once the run ends.

use crate::crawler::SiteReport;
use crate::state::SiteState;
use chrono::{DateTime, Duration, Utc};

/// Summary of one pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When scraping started
    pub started_at: DateTime<Utc>,

    /// When the export finished
    pub finished_at: DateTime<Utc>,

    /// One report per configured site, in config order
    pub sites: Vec<SiteReport>,

    /// Rows written to the CSV file (whole store, not just this run)
    pub rows_exported: u64,

    /// Where the CSV was written
    pub csv_path: String,
}

impl RunSummary {
    /// Events inserted during this run
    pub fn total_inserted(&self) -> u64 {
        self.sites.iter().map(|s| s.inserted).sum()
    }

    /// Event nodes skipped during this run
    pub fn total_skipped(&self) -> u64 {
        self.sites.iter().map(|s| s.skipped).sum()
    }

    /// Number of sites that ended in `state`
    pub fn count_in_state(&self, state: SiteState) -> usize {
        self.sites.iter().filter(|s| s.state == state).count()
    }

    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }
}

/// Prints the run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Scrape Summary ===\n");

    println!("Sites:");
    for site in &summary.sites {
        print!(
            "  {} [{}] pages: {}, stored: {}, skipped: {}",
            site.site, site.state, site.pages_fetched, site.inserted, site.skipped
        );
        match &site.error {
            Some(error) => println!(" ({})", error),
            None => println!(),
        }
    }
    println!();

    println!("Overview:");
    println!(
        "  Done: {}, Disallowed: {}, Aborted: {}",
        summary.count_in_state(SiteState::Done),
        summary.count_in_state(SiteState::Disallowed),
        summary.count_in_state(SiteState::Aborted)
    );
    println!("  Events stored this run: {}", summary.total_inserted());
    println!("  Malformed events skipped: {}", summary.total_skipped());
    println!(
        "  Rows exported: {} -> {}",
        summary.rows_exported, summary.csv_path
    );
    println!("  Duration: {}s", summary.duration().num_seconds());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(state: SiteState, inserted: u64, skipped: u64) -> SiteReport {
        SiteReport {
            site: "https://example.com".to_string(),
            state,
            pages_fetched: 1,
            inserted,
            skipped,
            error: None,
        }
    }

    #[test]
    fn test_totals() {
        let started_at = Utc::now();
        let summary = RunSummary {
            started_at,
            finished_at: started_at + Duration::seconds(42),
            sites: vec![
                report(SiteState::Done, 3, 1),
                report(SiteState::Disallowed, 0, 0),
                report(SiteState::Aborted, 2, 0),
            ],
            rows_exported: 12,
            csv_path: "events.csv".to_string(),
        };

        assert_eq!(summary.total_inserted(), 5);
        assert_eq!(summary.total_skipped(), 1);
        assert_eq!(summary.count_in_state(SiteState::Done), 1);
        assert_eq!(summary.count_in_state(SiteState::Disallowed), 1);
        assert_eq!(summary.duration().num_seconds(), 42);
    }
}
