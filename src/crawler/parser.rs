//! HTML parser for extracting event listings
//!
//! This module handles parsing a listing page to extract:
//! - One event per node matching the event selector
//! - The next-page link, if any
//!
//! Extraction failures are isolated per event node: a node missing a field
//! yields an `ExtractError` for that node and its siblings are unaffected.

use crate::config::SelectorConfig;
use crate::storage::NewEvent;
use crate::url::resolve_link;
use crate::{ConfigError, ConfigResult};
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use thiserror::Error;
use url::Url;

/// The sub-fields extracted from every event node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Name,
    Date,
    Venue,
    Speakers,
    Price,
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::Date => "date",
            Self::Venue => "venue",
            Self::Speakers => "speakers",
            Self::Price => "price",
        };
        write!(f, "{}", label)
    }
}

/// Why an event node could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("event #{index} has no {field} element")]
    MissingField { index: usize, field: EventField },
}

/// Compiled selectors for event pages
#[derive(Debug, Clone)]
pub struct EventSelectors {
    event: Selector,
    name: Selector,
    date: Selector,
    venue: Selector,
    speakers: Selector,
    price: Selector,
    next_page: Selector,
}

impl EventSelectors {
    /// Compiles every selector in the config
    pub fn from_config(config: &SelectorConfig) -> ConfigResult<Self> {
        Ok(Self {
            event: compile("event", &config.event)?,
            name: compile("name", &config.name)?,
            date: compile("date", &config.date)?,
            venue: compile("venue", &config.venue)?,
            speakers: compile("speakers", &config.speakers)?,
            price: compile("price", &config.price)?,
            next_page: compile("next-page", &config.next_page)?,
        })
    }
}

fn compile(name: &str, selector: &str) -> ConfigResult<Selector> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        name: name.to_string(),
        selector: selector.to_string(),
    })
}

/// Extracted information from a listing page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// One entry per event node, in document order
    pub events: Vec<Result<NewEvent, ExtractError>>,

    /// Absolute URL of the next page, if the page links to one
    pub next_page: Option<Url>,
}

/// Parses a listing page
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - URL the page was served from; relative next-page links
///   resolve against it
/// * `source` - Stored as each event's source
/// * `selectors` - Compiled selectors
///
/// # Example
///
/// ```
/// use event_scraper::config::SelectorConfig;
/// use event_scraper::crawler::{parse_events, EventSelectors};
/// use url::Url;
///
/// let html = r#"<div class="event">
///     <h2 class="event-name">RustConf</h2>
///     <span class="event-date">Sep 10</span>
///     <span class="event-venue">Montreal</span>
///     <span class="event-speakers">Ferris</span>
///     <span class="event-price">$100</span>
/// </div>"#;
/// let selectors = EventSelectors::from_config(&SelectorConfig::default()).unwrap();
/// let page_url = Url::parse("https://example.com/events").unwrap();
/// let parsed = parse_events(html, &page_url, page_url.as_str(), &selectors);
///
/// let event = parsed.events[0].as_ref().unwrap();
/// assert_eq!(event.name, "RustConf");
/// assert!(parsed.next_page.is_none());
/// ```
pub fn parse_events(
    html: &str,
    page_url: &Url,
    source: &str,
    selectors: &EventSelectors,
) -> ParsedPage {
    let document = Html::parse_document(html);

    let events = document
        .select(&selectors.event)
        .enumerate()
        .map(|(index, node)| extract_event(node, index, source, selectors))
        .collect();

    let next_page = extract_next_page(&document, page_url, &selectors.next_page);

    ParsedPage { events, next_page }
}

/// Extracts the five fields of one event node
fn extract_event(
    node: ElementRef<'_>,
    index: usize,
    source: &str,
    selectors: &EventSelectors,
) -> Result<NewEvent, ExtractError> {
    let text_of = |selector: &Selector, field: EventField| {
        node.select(selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .ok_or(ExtractError::MissingField { index, field })
    };

    Ok(NewEvent {
        name: text_of(&selectors.name, EventField::Name)?,
        date: text_of(&selectors.date, EventField::Date)?,
        venue: text_of(&selectors.venue, EventField::Venue)?,
        speakers: text_of(&selectors.speakers, EventField::Speakers)?,
        ticket_price: text_of(&selectors.price, EventField::Price)?,
        source: source.to_string(),
    })
}

/// Finds the first next-page element and resolves its href
fn extract_next_page(document: &Html, page_url: &Url, selector: &Selector) -> Option<Url> {
    let element = document.select(selector).next()?;
    let href = element.value().attr("href")?;
    resolve_link(href, page_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> EventSelectors {
        EventSelectors::from_config(&SelectorConfig::default()).unwrap()
    }

    const SOURCE: &str = "https://example.com/events?page=1";

    fn page_url() -> Url {
        Url::parse(SOURCE).unwrap()
    }

    fn event_html(name: &str) -> String {
        format!(
            r#"<div class="event">
                <h3 class="event-name">{}</h3>
                <p class="event-date">2025-05-01</p>
                <p class="event-venue">Town Hall</p>
                <p class="event-speakers">Grace Hopper, Linus Torvalds</p>
                <p class="event-price">Free</p>
            </div>"#,
            name
        )
    }

    #[test]
    fn test_extracts_all_events_in_order() {
        let html = format!(
            "<html><body>{}{}{}</body></html>",
            event_html("One"),
            event_html("Two"),
            event_html("Three")
        );
        let parsed = parse_events(&html, &page_url(), SOURCE, &selectors());

        let names: Vec<_> = parsed
            .events
            .iter()
            .map(|e| e.as_ref().unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_fields_and_source() {
        let parsed = parse_events(&event_html("Meetup"), &page_url(), SOURCE, &selectors());
        let event = parsed.events[0].as_ref().unwrap();

        assert_eq!(event.date, "2025-05-01");
        assert_eq!(event.venue, "Town Hall");
        assert_eq!(event.speakers, "Grace Hopper, Linus Torvalds");
        assert_eq!(event.ticket_price, "Free");
        assert_eq!(event.source, "https://example.com/events?page=1");
    }

    #[test]
    fn test_source_is_stored_verbatim() {
        let served_from = Url::parse("https://www.example.com/listing/").unwrap();
        let html = format!(
            r#"{}<a class="next-page" href="page2">Next</a>"#,
            event_html("Moved")
        );
        let parsed = parse_events(&html, &served_from, "http://example.com", &selectors());

        assert_eq!(parsed.events[0].as_ref().unwrap().source, "http://example.com");
        assert_eq!(
            parsed.next_page.unwrap().as_str(),
            "https://www.example.com/listing/page2"
        );
    }

    #[test]
    fn test_text_is_trimmed_and_nested_text_joined() {
        let html = r#"<div class="event">
            <h3 class="event-name">  <b>Rust</b> Night  </h3>
            <p class="event-date">
                Friday
            </p>
            <p class="event-venue">Pub</p>
            <p class="event-speakers"></p>
            <p class="event-price">$5</p>
        </div>"#;
        let parsed = parse_events(html, &page_url(), SOURCE, &selectors());
        let event = parsed.events[0].as_ref().unwrap();

        assert_eq!(event.name, "Rust Night");
        assert_eq!(event.date, "Friday");
        assert_eq!(event.speakers, "");
    }

    #[test]
    fn test_missing_field_isolated_to_its_node() {
        let broken = r#"<div class="event">
            <h3 class="event-name">Broken</h3>
            <p class="event-date">2025-05-02</p>
            <p class="event-venue">Nowhere</p>
            <p class="event-speakers">Nobody</p>
        </div>"#;
        let html = format!("{}{}{}", event_html("Before"), broken, event_html("After"));
        let parsed = parse_events(&html, &page_url(), SOURCE, &selectors());

        assert_eq!(parsed.events.len(), 3);
        assert_eq!(parsed.events[0].as_ref().unwrap().name, "Before");
        assert_eq!(
            parsed.events[1],
            Err(ExtractError::MissingField {
                index: 1,
                field: EventField::Price
            })
        );
        assert_eq!(parsed.events[2].as_ref().unwrap().name, "After");
    }

    #[test]
    fn test_first_missing_field_reported() {
        let html = r#"<div class="event"><p class="event-price">$1</p></div>"#;
        let parsed = parse_events(html, &page_url(), SOURCE, &selectors());
        assert_eq!(
            parsed.events[0],
            Err(ExtractError::MissingField {
                index: 0,
                field: EventField::Name
            })
        );
    }

    #[test]
    fn test_no_events() {
        let html = "<html><body><p>Nothing here</p></body></html>";
        let parsed = parse_events(html, &page_url(), SOURCE, &selectors());
        assert!(parsed.events.is_empty());
        assert!(parsed.next_page.is_none());
    }

    #[test]
    fn test_absolute_next_page() {
        let html = r#"<a class="next-page" href="https://example.com/events?page=2">Next</a>"#;
        let parsed = parse_events(html, &page_url(), SOURCE, &selectors());
        assert_eq!(
            parsed.next_page.unwrap().as_str(),
            "https://example.com/events?page=2"
        );
    }

    #[test]
    fn test_relative_next_page_resolved() {
        let html = r#"<a class="next-page" href="/events?page=2">Next</a>"#;
        let parsed = parse_events(html, &page_url(), SOURCE, &selectors());
        assert_eq!(
            parsed.next_page.unwrap().as_str(),
            "https://example.com/events?page=2"
        );
    }

    #[test]
    fn test_empty_or_missing_href_stops() {
        let empty = r#"<a class="next-page" href="">Next</a>"#;
        assert!(parse_events(empty, &page_url(), SOURCE, &selectors()).next_page.is_none());

        let missing = r#"<span class="next-page">Next</span>"#;
        assert!(parse_events(missing, &page_url(), SOURCE, &selectors()).next_page.is_none());
    }

    #[test]
    fn test_custom_selectors() {
        let config = SelectorConfig {
            event: "li.listing".to_string(),
            name: "h2".to_string(),
            date: "time".to_string(),
            venue: ".where".to_string(),
            speakers: ".who".to_string(),
            price: ".cost".to_string(),
            next_page: "a[rel=next]".to_string(),
        };
        let selectors = EventSelectors::from_config(&config).unwrap();
        let html = r#"<ul><li class="listing"><h2>Talk</h2><time>Today</time>
            <span class="where">Room 1</span><span class="who">Ann</span>
            <span class="cost">0</span></li></ul><a rel="next" href="p2">more</a>"#;

        let parsed = parse_events(html, &page_url(), SOURCE, &selectors);
        assert_eq!(parsed.events[0].as_ref().unwrap().venue, "Room 1");
        assert_eq!(
            parsed.next_page.unwrap().as_str(),
            "https://example.com/p2"
        );
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let config = SelectorConfig {
            event: "div[[".to_string(),
            ..SelectorConfig::default()
        };
        assert!(matches!(
            EventSelectors::from_config(&config),
            Err(ConfigError::InvalidSelector { .. })
        ));
    }
}
