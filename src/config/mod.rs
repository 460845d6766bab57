//! Configuration module for Event Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use event_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Sites to scrape: {}", config.scraper.sites.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, OutputConfig, RobotsConfig, ScraperConfig, SelectorConfig, UnreachablePolicy,
    DEFAULT_SITES, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
