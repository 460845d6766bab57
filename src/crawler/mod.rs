//! Crawler module for fetching and processing listing pages
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching
//! - HTML parsing and event extraction
//! - Per-origin request throttling
//! - Overall pipeline coordination

mod coordinator;
mod fetcher;
mod limiter;
mod parser;

pub use coordinator::{run_pipeline, Coordinator, SiteReport};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use limiter::RateLimiter;
pub use parser::{parse_events, EventField, EventSelectors, ExtractError, ParsedPage};
