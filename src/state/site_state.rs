/// Site state definitions for tracking scrape progress
///
/// Every configured site walks the same small machine:
/// `NotStarted -> PolicyChecked -> Fetching -> Paginating* -> Done | Aborted`,
/// or `NotStarted -> Disallowed` when robots.txt forbids the start URL.
use crate::{Result, ScrapeError};
use std::fmt;

/// Represents the current state of a site in the scrape run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SiteState {
    // ===== Active States =====
    /// Site has not been touched yet
    #[default]
    NotStarted,

    /// robots.txt allowed the start URL
    PolicyChecked,

    /// First page is being fetched and parsed
    Fetching,

    /// A next-page link is being followed
    Paginating,

    // ===== Terminal States =====
    /// No further next-page link
    Done,

    /// robots.txt forbids the start URL; nothing was fetched
    Disallowed,

    /// A page fetch failed; pagination stopped
    Aborted,
}

impl SiteState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Disallowed | Self::Aborted)
    }

    /// Checks whether moving from `self` to `next` is a legal step
    pub fn can_transition_to(&self, next: SiteState) -> bool {
        use SiteState::*;

        if self.is_terminal() {
            return false;
        }

        matches!(
            (*self, next),
            (NotStarted, PolicyChecked)
                | (NotStarted, Disallowed)
                | (PolicyChecked, Fetching)
                | (Fetching, Paginating)
                | (Fetching, Done)
                | (Fetching, Aborted)
                | (Paginating, Paginating)
                | (Paginating, Done)
                | (Paginating, Aborted)
        )
    }

    /// Moves to `next`, rejecting illegal transitions
    pub fn transition(&mut self, next: SiteState) -> Result<()> {
        if !self.can_transition_to(next) {
            return Err(ScrapeError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        tracing::trace!("Site state {} -> {}", self, next);
        *self = next;
        Ok(())
    }

    /// Short lowercase label used in logs and the run summary
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::PolicyChecked => "policy_checked",
            Self::Fetching => "fetching",
            Self::Paginating => "paginating",
            Self::Done => "done",
            Self::Disallowed => "disallowed",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for SiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
