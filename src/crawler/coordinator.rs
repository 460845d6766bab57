//! Scrape coordinator - main pipeline orchestration logic
//!
//! This module contains the main scrape loop, which:
//! - Checks robots.txt before any page of a site is fetched
//! - Fetches and parses listing pages, following next-page links
//! - Writes every extracted event to the injected store immediately
//! - Exports the whole store once all sites are done

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::limiter::RateLimiter;
use crate::crawler::parser::{parse_events, EventSelectors};
use crate::output::{export_csv, RunSummary};
use crate::robots::{fetch_robots, is_allowed, RobotsCache, WILDCARD_AGENT};
use crate::state::SiteState;
use crate::storage::EventStore;
use crate::url::origin_of;
use crate::Result;
use chrono::Utc;
use reqwest::Client;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Outcome of scraping one configured site
#[derive(Debug, Clone)]
pub struct SiteReport {
    /// Start URL as configured
    pub site: String,

    /// Terminal state the site ended in
    pub state: SiteState,

    /// Listing pages successfully fetched
    pub pages_fetched: u32,

    /// Events written to the store
    pub inserted: u64,

    /// Event nodes skipped because a field was missing
    pub skipped: u64,

    /// Reason the site was aborted, if it was
    pub error: Option<String>,
}

impl SiteReport {
    fn new(site: &str) -> Self {
        Self {
            site: site.to_string(),
            state: SiteState::NotStarted,
            pages_fetched: 0,
            inserted: 0,
            skipped: 0,
            error: None,
        }
    }
}

/// Main scraper coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    selectors: EventSelectors,
    limiter: RateLimiter,
    robots: RobotsCache,
}

impl Coordinator {
    /// Creates a new coordinator
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to scrape
    /// * `Err(ScrapeError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config) -> Result<Self> {
        crate::config::validate(&config)?;

        let selectors = EventSelectors::from_config(&config.selectors)?;
        let client = build_http_client(&config.scraper.user_agent)?;
        let limiter = RateLimiter::new(Duration::from_millis(config.scraper.page_delay_ms));

        Ok(Self {
            config,
            client,
            selectors,
            limiter,
            robots: RobotsCache::new(),
        })
    }

    /// Scrapes every configured site in order
    ///
    /// Sites never affect each other: a site that is disallowed or aborted is
    /// reported and the next one starts. Only store failures end the run.
    pub async fn run<S: EventStore>(
        &mut self,
        storage: &mut S,
    ) -> Result<Vec<SiteReport>> {
        let sites = self.config.scraper.sites.clone();
        let site_delay = Duration::from_millis(self.config.scraper.site_delay_ms);
        let mut reports = Vec::with_capacity(sites.len());

        for (index, site) in sites.iter().enumerate() {
            tracing::info!("Scraping site {}/{}: {}", index + 1, sites.len(), site);
            let report = self.scrape_site(site, storage).await?;

            tracing::info!(
                "Finished {} ({}): {} pages, {} events stored, {} skipped",
                site,
                report.state,
                report.pages_fetched,
                report.inserted,
                report.skipped
            );

            let scraped = report.state != SiteState::Disallowed;
            reports.push(report);

            if scraped && index + 1 < sites.len() && !site_delay.is_zero() {
                tracing::debug!("Pausing {:?} before next site", site_delay);
                tokio::time::sleep(site_delay).await;
            }
        }

        Ok(reports)
    }

    /// Answers whether the wildcard agent may fetch `url`
    ///
    /// robots.txt is fetched once per origin per run; a `Crawl-delay` for `*`
    /// raises the origin's request interval.
    pub async fn check_policy(&mut self, url: &Url) -> Result<bool> {
        let origin = origin_of(url)?;

        if let Some(robots) = self.robots.get(&origin) {
            return Ok(is_allowed(robots, url));
        }

        self.limiter.wait(&origin).await;
        let robots = fetch_robots(&self.client, url, self.config.robots.on_unreachable).await?;

        if let Some(delay) = robots
            .crawl_delay(WILDCARD_AGENT)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        {
            self.limiter.raise_interval(&origin, delay);
            tracing::info!(
                "{} sets a Crawl-delay, request interval is now {:?}",
                origin,
                self.limiter.interval_for(&origin)
            );
        }

        let robots = self.robots.insert(&origin, robots);
        Ok(is_allowed(robots, url))
    }

    /// Scrapes one site: policy check, then the pagination chain
    pub async fn scrape_site<S: EventStore>(
        &mut self,
        site: &str,
        storage: &mut S,
    ) -> Result<SiteReport> {
        let mut report = SiteReport::new(site);
        let mut state = SiteState::NotStarted;
        let start = Url::parse(site)?;

        if !self.check_policy(&start).await? {
            tracing::info!("Skipping {}: disallowed by robots.txt", site);
            state.transition(SiteState::Disallowed)?;
            report.state = state;
            return Ok(report);
        }

        state.transition(SiteState::PolicyChecked)?;
        state.transition(SiteState::Fetching)?;

        let max_pages = self.config.scraper.max_pages;
        let mut visited: HashSet<Url> = HashSet::new();
        let mut current = start;
        // Events record the site URL exactly as configured for the first page
        let mut source = site.to_string();

        loop {
            visited.insert(current.clone());
            let origin = origin_of(&current)?;
            self.limiter.wait(&origin).await;

            let (served_from, body) = match fetch_page(&self.client, &current).await {
                FetchResult::Success {
                    final_url,
                    status_code,
                    body,
                } => {
                    tracing::debug!("Fetched {} (HTTP {})", current, status_code);
                    if final_url != current {
                        tracing::info!("{} redirected to {}", current, final_url);
                        visited.insert(final_url.clone());
                    }
                    (final_url, body)
                }
                failure => {
                    let reason = failure.failure_reason().unwrap_or_default();
                    tracing::error!("Error fetching URL {}: {}", current, reason);
                    state.transition(SiteState::Aborted)?;
                    report.error = Some(reason);
                    break;
                }
            };
            report.pages_fetched += 1;

            let parsed = parse_events(&body, &served_from, &source, &self.selectors);
            for extracted in parsed.events {
                match extracted {
                    Ok(event) => {
                        storage.insert_event(&event)?;
                        report.inserted += 1;
                    }
                    Err(e) => {
                        tracing::warn!("Skipping malformed event on {}: {}", current, e);
                        report.skipped += 1;
                    }
                }
            }

            let Some(next) = parsed.next_page else {
                state.transition(SiteState::Done)?;
                break;
            };

            if visited.contains(&next) {
                tracing::warn!(
                    "Next-page link {} on {} was already visited, stopping",
                    next,
                    current
                );
                state.transition(SiteState::Done)?;
                break;
            }

            if max_pages > 0 && report.pages_fetched >= max_pages {
                tracing::info!("Reached max-pages ({}) for {}", max_pages, site);
                state.transition(SiteState::Done)?;
                break;
            }

            if !self.check_policy(&next).await? {
                tracing::info!("Next page {} disallowed by robots.txt, stopping", next);
                state.transition(SiteState::Done)?;
                break;
            }

            state.transition(SiteState::Paginating)?;
            source = next.to_string();
            current = next;
        }

        report.state = state;
        Ok(report)
    }
}

/// Runs the whole pipeline against an already opened store
///
/// 1. Scrape every configured site, inserting events as they are extracted
/// 2. Export the full store to the configured CSV path
/// 3. Return a summary of the run
///
/// # Example
///
/// ```no_run
/// use event_scraper::config::Config;
/// use event_scraper::crawler::run_pipeline;
/// use event_scraper::storage::SqliteStorage;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let mut storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
/// let summary = run_pipeline(config, &mut storage).await?;
/// println!("{} rows exported", summary.rows_exported);
/// # Ok(())
/// # }
/// ```
pub async fn run_pipeline<S: EventStore>(
    config: Config,
    storage: &mut S,
) -> Result<RunSummary> {
    let started_at = Utc::now();
    let csv_path = config.output.csv_path.clone();

    let mut coordinator = Coordinator::new(config)?;
    let sites = coordinator.run(storage).await?;

    let rows_exported = export_csv(&*storage, Path::new(&csv_path))?;

    Ok(RunSummary {
        started_at,
        finished_at: Utc::now(),
        sites,
        rows_exported,
        csv_path,
    })
}
