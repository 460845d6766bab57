//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building HTTP clients with the configured user agent
//! - GET requests for listing pages
//! - Error classification (no retries)

use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Human-readable reason for a failed fetch, None on success
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Builds an HTTP client that sends `user_agent` with every request
///
/// # Example
///
/// ```no_run
/// use event_scraper::crawler::build_http_client;
///
/// let client = build_http_client("Mozilla/5.0 (compatible; EventScraper/1.0)").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a listing page
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Success with body |
/// | any other status | HttpError |
/// | timeout, connect failure, too many redirects, unreadable body | NetworkError |
///
/// Failures are not retried; the caller decides what a failure means for the site.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        "Too many redirects".to_string()
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}
