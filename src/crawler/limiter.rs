//! Per-origin request throttling
//!
//! Every request (robots.txt and listing pages alike) goes through
//! [`RateLimiter::wait`], which enforces a minimum interval between requests
//! to the same origin. The interval starts at the configured page delay and
//! can only be raised, e.g. by a robots.txt `Crawl-delay`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Throttling state for one origin
#[derive(Debug, Clone)]
struct OriginState {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl OriginState {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.min_interval {
            Some(self.min_interval - elapsed)
        } else {
            None
        }
    }
}

/// Enforces a minimum interval between requests to the same origin
#[derive(Debug)]
pub struct RateLimiter {
    default_interval: Duration,
    origins: HashMap<String, OriginState>,
}

impl RateLimiter {
    /// Creates a limiter applying `default_interval` to every origin
    pub fn new(default_interval: Duration) -> Self {
        Self {
            default_interval,
            origins: HashMap::new(),
        }
    }

    fn state_mut(&mut self, origin: &str) -> &mut OriginState {
        let default_interval = self.default_interval;
        self.origins
            .entry(origin.to_string())
            .or_insert_with(|| OriginState::new(default_interval))
    }

    /// Raises the minimum interval for `origin`; lower values are ignored
    pub fn raise_interval(&mut self, origin: &str, interval: Duration) {
        let state = self.state_mut(origin);
        if interval > state.min_interval {
            tracing::debug!(
                "Raising request interval for {} from {:?} to {:?}",
                origin,
                state.min_interval,
                interval
            );
            state.min_interval = interval;
        }
    }

    /// Current minimum interval for `origin`
    pub fn interval_for(&self, origin: &str) -> Duration {
        self.origins
            .get(origin)
            .map(|s| s.min_interval)
            .unwrap_or(self.default_interval)
    }

    /// How long a request to `origin` made at `now` would have to wait
    pub fn time_until_next_request(&self, origin: &str, now: Instant) -> Option<Duration> {
        self.origins
            .get(origin)
            .and_then(|s| s.time_until_next_request(now))
    }

    /// Sleeps until a request to `origin` is permitted, then records it
    pub async fn wait(&mut self, origin: &str) {
        if let Some(delay) = self.time_until_next_request(origin, Instant::now()) {
            tracing::debug!("Waiting {:?} before next request to {}", delay, origin);
            tokio::time::sleep(delay).await;
        }

        self.state_mut(origin).last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(3));
        assert_eq!(
            limiter.time_until_next_request("https://example.com", Instant::now()),
            None
        );
    }

    #[tokio::test]
    async fn test_second_request_must_wait() {
        let mut limiter = RateLimiter::new(Duration::from_secs(3));
        limiter.wait("https://example.com").await;

        let remaining = limiter
            .time_until_next_request("https://example.com", Instant::now())
            .unwrap();
        assert!(remaining <= Duration::from_secs(3));
        assert!(remaining > Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_origins_are_independent() {
        let mut limiter = RateLimiter::new(Duration::from_secs(3));
        limiter.wait("https://a.example.com").await;

        assert_eq!(
            limiter.time_until_next_request("https://b.example.com", Instant::now()),
            None
        );
    }

    #[tokio::test]
    async fn test_wait_enforces_interval() {
        let mut limiter = RateLimiter::new(Duration::from_millis(60));
        let start = Instant::now();
        limiter.wait("https://example.com").await;
        limiter.wait("https://example.com").await;
        limiter.wait("https://example.com").await;

        assert!(start.elapsed() >= Duration::from_millis(120));
    }

    #[tokio::test]
    async fn test_zero_interval_never_waits() {
        let mut limiter = RateLimiter::new(Duration::ZERO);
        limiter.wait("https://example.com").await;
        assert_eq!(
            limiter.time_until_next_request("https://example.com", Instant::now()),
            None
        );
    }

    #[test]
    fn test_raise_interval_only_increases() {
        let mut limiter = RateLimiter::new(Duration::from_secs(3));
        let origin = "https://example.com";

        limiter.raise_interval(origin, Duration::from_secs(1));
        assert_eq!(limiter.interval_for(origin), Duration::from_secs(3));

        limiter.raise_interval(origin, Duration::from_secs(10));
        assert_eq!(limiter.interval_for(origin), Duration::from_secs(10));

        assert_eq!(
            limiter.interval_for("https://other.example.com"),
            Duration::from_secs(3)
        );
    }
}
