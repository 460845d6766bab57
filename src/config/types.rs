use serde::Deserialize;

/// User agent sent with every request unless the config overrides it
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Sites scraped when no configuration file is given
pub const DEFAULT_SITES: [&str; 2] = [
    "https://example-event-website1.com",
    "https://example-event-website2.com",
];

/// Main configuration structure for Event Scraper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub robots: RobotsConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig {
                sites: DEFAULT_SITES.iter().map(|s| s.to_string()).collect(),
                user_agent: default_user_agent(),
                page_delay_ms: default_page_delay_ms(),
                site_delay_ms: default_site_delay_ms(),
                max_pages: 0,
            },
            robots: RobotsConfig::default(),
            selectors: SelectorConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Scraping behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Start URLs, scraped in order
    pub sites: Vec<String>,

    /// Value of the User-Agent header
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Minimum time between requests to the same origin (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Pause after each scraped site before the next one starts (milliseconds)
    #[serde(rename = "site-delay-ms", default = "default_site_delay_ms")]
    pub site_delay_ms: u64,

    /// Maximum pages fetched per site, 0 means unlimited
    #[serde(rename = "max-pages", default)]
    pub max_pages: u32,
}

/// What to do when a site's robots.txt cannot be retrieved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreachablePolicy {
    /// Treat the site as allowing everything
    #[default]
    Allow,
    /// Treat the site as disallowing everything
    Deny,
}

/// Robots.txt handling configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RobotsConfig {
    /// Applied on network errors and 5xx responses
    #[serde(rename = "on-unreachable", default)]
    pub on_unreachable: UnreachablePolicy,
}

/// CSS selectors used to locate events and their fields
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub event: String,
    pub name: String,
    pub date: String,
    pub venue: String,
    pub speakers: String,
    pub price: String,
    #[serde(rename = "next-page")]
    pub next_page: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            event: ".event".to_string(),
            name: ".event-name".to_string(),
            date: ".event-date".to_string(),
            venue: ".event-venue".to_string(),
            speakers: ".event-speakers".to_string(),
            price: ".event-price".to_string(),
            next_page: ".next-page".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// Path to the exported CSV file
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            csv_path: default_csv_path(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_page_delay_ms() -> u64 {
    3000
}

fn default_site_delay_ms() -> u64 {
    5000
}

fn default_database_path() -> String {
    "events.db".to_string()
}

fn default_csv_path() -> String {
    "events.csv".to_string()
}
