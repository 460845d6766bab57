//! State module for tracking scrape progress
//!
//! - `SiteState`: per-site lifecycle (policy check, fetching, pagination, terminal outcome)

mod site_state;

pub use site_state::SiteState;
