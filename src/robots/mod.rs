//! Robots.txt handling module
//!
//! This module provides functionality for fetching, parsing, and caching robots.txt files.
//!
//! # Failure policy
//!
//! | Response | Result |
//! |----------|--------|
//! | 2xx | body is parsed |
//! | 401 / 403 | deny everything |
//! | other 4xx | allow everything (no policy published) |
//! | 5xx, network error, unreadable body | [`UnreachablePolicy`] from config |

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::{ParsedRobots, WILDCARD_AGENT};

use crate::config::UnreachablePolicy;
use crate::url::robots_url;
use crate::Result;
use reqwest::{Client, StatusCode};
use url::Url;

/// Fetches and parses robots.txt for the origin serving `url`
///
/// # Arguments
///
/// * `client` - The HTTP client (carries the configured user agent)
/// * `url` - Any URL on the site
/// * `on_unreachable` - What to assume when the policy cannot be retrieved
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - The policy to apply to the origin
/// * `Err(ScrapeError)` - `url` has no usable origin
pub async fn fetch_robots(
    client: &Client,
    url: &Url,
    on_unreachable: UnreachablePolicy,
) -> Result<ParsedRobots> {
    let robots_url = robots_url(url)?;
    tracing::debug!("Fetching {}", robots_url);

    let response = match client.get(robots_url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Could not fetch {}: {}", robots_url, e);
            return Ok(policy_when_unreachable(on_unreachable));
        }
    };

    let status = response.status();
    if status.is_success() {
        return match response.text().await {
            Ok(body) => Ok(ParsedRobots::from_content(&body)),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", robots_url, e);
                Ok(policy_when_unreachable(on_unreachable))
            }
        };
    }

    Ok(classify_status(status, on_unreachable, &robots_url))
}

/// Maps a non-success robots.txt status to a policy
fn classify_status(
    status: StatusCode,
    on_unreachable: UnreachablePolicy,
    robots_url: &Url,
) -> ParsedRobots {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::info!(
            "{} returned HTTP {}, treating site as disallowed",
            robots_url,
            status.as_u16()
        );
        ParsedRobots::deny_all()
    } else if status.is_client_error() {
        tracing::debug!(
            "{} returned HTTP {}, no policy published",
            robots_url,
            status.as_u16()
        );
        ParsedRobots::allow_all()
    } else {
        tracing::warn!("{} returned HTTP {}", robots_url, status.as_u16());
        policy_when_unreachable(on_unreachable)
    }
}

fn policy_when_unreachable(policy: UnreachablePolicy) -> ParsedRobots {
    match policy {
        UnreachablePolicy::Allow => ParsedRobots::allow_all(),
        UnreachablePolicy::Deny => ParsedRobots::deny_all(),
    }
}

/// Checks if a URL is allowed for the wildcard agent
pub fn is_allowed(robots: &ParsedRobots, url: &Url) -> bool {
    robots.is_allowed(url.as_str(), WILDCARD_AGENT)
}
