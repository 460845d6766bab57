//! Per-run robots.txt cache keyed by origin
//!
//! Several configured sites may share an origin; robots.txt is fetched once
//! per origin per run.

use crate::robots::ParsedRobots;
use std::collections::HashMap;

/// Origin -> robots.txt map
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<String, ParsedRobots>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, origin: &str) -> Option<&ParsedRobots> {
        self.entries.get(origin)
    }

    pub fn insert(&mut self, origin: &str, robots: ParsedRobots) -> &ParsedRobots {
        self.entries.insert(origin.to_string(), robots);
        &self.entries[origin]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keyed_by_origin() {
        let mut cache = RobotsCache::new();

        cache.insert("https://a.example.com", ParsedRobots::deny_all());
        cache.insert("https://b.example.com", ParsedRobots::allow_all());

        assert_eq!(
            cache.get("https://a.example.com"),
            Some(&ParsedRobots::deny_all())
        );
        assert_eq!(
            cache.get("https://b.example.com"),
            Some(&ParsedRobots::allow_all())
        );
        assert!(cache.get("https://c.example.com").is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let mut cache = RobotsCache::new();
        cache.insert("https://a.example.com", ParsedRobots::deny_all());
        let entry = cache.insert("https://a.example.com", ParsedRobots::allow_all());
        assert_eq!(entry, &ParsedRobots::allow_all());
    }
}
