//! URL handling module for Event Scraper
//!
//! Origin derivation (used for robots.txt lookup and per-origin throttling)
//! and resolution of pagination links.

mod origin;
mod resolve;

pub use origin::{origin_of, robots_url};
pub use resolve::resolve_link;
