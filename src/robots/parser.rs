//! Robots.txt parser implementation
//!
//! Rule evaluation is delegated to the robotstxt crate (a port of Google's
//! matcher); this module only decides which rule set applies.

use robotstxt::DefaultMatcher;

/// User agent evaluated against robots.txt groups
pub const WILDCARD_AGENT: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rules {
    /// No usable policy, everything may be fetched
    AllowAll,
    /// Access to the policy was refused, nothing may be fetched
    DenyAll,
    /// Raw robots.txt body
    Content(String),
}

/// Parsed robots.txt data for one origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRobots {
    rules: Rules,
}

impl ParsedRobots {
    /// Creates a ParsedRobots from a robots.txt body
    ///
    /// An empty body allows everything.
    pub fn from_content(content: &str) -> Self {
        if content.trim().is_empty() {
            return Self::allow_all();
        }
        Self {
            rules: Rules::Content(content.to_string()),
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    pub fn allow_all() -> Self {
        Self {
            rules: Rules::AllowAll,
        }
    }

    /// Creates a ParsedRobots that disallows everything
    pub fn deny_all() -> Self {
        Self {
            rules: Rules::DenyAll,
        }
    }

    /// Returns the raw robots.txt body, if one was parsed
    pub fn content(&self) -> Option<&str> {
        match &self.rules {
            Rules::Content(body) => Some(body),
            _ => None,
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL or path to check
    /// * `user_agent` - The user agent to evaluate, usually [`WILDCARD_AGENT`]
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        match &self.rules {
            Rules::AllowAll => true,
            Rules::DenyAll => false,
            Rules::Content(body) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(body, user_agent, url)
            }
        }
    }

    /// Gets the crawl delay in seconds that applies to `user_agent`
    ///
    /// A group naming the agent wins over the `*` group.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        let body = self.content()?;

        let agent = user_agent.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut in_rules = false;
        let mut wildcard_delay = None;
        let mut agent_delay = None;

        for line in body.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // A user-agent line after rules starts a new group
                    if in_rules {
                        group.clear();
                        in_rules = false;
                    }
                    group.push(value.to_lowercase());
                }
                "crawl-delay" => {
                    in_rules = true;
                    let Ok(delay) = value.parse::<f64>() else {
                        continue;
                    };
                    if group.iter().any(|ua| ua == "*") {
                        wildcard_delay = Some(delay);
                    }
                    if agent != "*"
                        && group
                            .iter()
                            .any(|ua| ua != "*" && agent.contains(ua.as_str()))
                    {
                        agent_delay = Some(delay);
                    }
                }
                _ => in_rules = true,
            }
        }

        agent_delay.or(wildcard_delay)
    }
}
