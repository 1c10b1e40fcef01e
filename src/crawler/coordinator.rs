//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the archive walk: fetch a page, parse it, append its
//! table, then either stop or pause and follow the next-page link.

use crate::config::{Config, CrawlerConfig, SiteConfig, DEFAULT_END_URL};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::parser::{ArchiveParser, ArticleRecord, PageParser, PageResult};
use crate::state::{CrawlState, Termination};
use crate::ArchiveError;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Articles extracted from one fetched archive page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageTable {
    /// The URL the page was fetched from
    pub url: String,

    /// Articles in document order
    pub articles: Vec<ArticleRecord>,
}

/// Final product of a crawl: one table per page, in fetch order
#[derive(Debug, Clone)]
pub struct CrawlOutput {
    pub pages: Vec<PageTable>,
    pub termination: Termination,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlOutput {
    /// Number of pages fetched
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of articles across all pages
    pub fn article_count(&self) -> usize {
        self.pages.iter().map(|page| page.articles.len()).sum()
    }

    /// Iterates over every article, page by page
    pub fn articles(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.pages.iter().flat_map(|page| page.articles.iter())
    }

    /// Consumes the output, returning the per-page tables
    pub fn into_tables(self) -> Vec<PageTable> {
        self.pages
    }
}

/// Decides when the crawl has reached the end of the archive
///
/// Evaluated against the next-page URL parsed from each page.
#[derive(Clone)]
pub enum StopCondition {
    /// Stop when the next-page URL equals this URL exactly
    EndMarker(String),

    /// Stop when the predicate returns true
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl StopCondition {
    /// Builds a predicate-based stop condition
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Returns true if the crawl should stop before following `next_page_url`
    pub fn matches(&self, next_page_url: &str) -> bool {
        match self {
            Self::EndMarker(end_url) => next_page_url == end_url,
            Self::Predicate(f) => f(next_page_url),
        }
    }
}

impl Default for StopCondition {
    fn default() -> Self {
        Self::EndMarker(DEFAULT_END_URL.to_string())
    }
}

impl fmt::Debug for StopCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndMarker(url) => f.debug_tuple("EndMarker").field(url).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Random pause between consecutive page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolitenessDelay {
    min: Duration,
    max: Duration,
}

impl PolitenessDelay {
    /// Uniform delay in `[min, max)`; `max` below `min` is raised to `min`
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// No pause at all
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draws one delay; returns `min` when the range is empty
    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::rng().random_range(self.min..self.max)
    }
}

impl Default for PolitenessDelay {
    fn default() -> Self {
        Self::from_millis(1000, 3000)
    }
}

/// Settings controlling when and how fast the crawl proceeds
#[derive(Debug, Clone, Default)]
pub struct CrawlSettings {
    pub stop: StopCondition,
    /// Safety bound on the number of pages fetched
    pub max_pages: Option<usize>,
    pub delay: PolitenessDelay,
}

impl CrawlSettings {
    /// Builds settings from the site and crawler configuration sections
    pub fn from_config(site: &SiteConfig, crawler: &CrawlerConfig) -> Self {
        Self {
            stop: StopCondition::EndMarker(site.end_url.clone()),
            max_pages: crawler.max_pages,
            delay: PolitenessDelay::from_millis(crawler.min_delay_ms, crawler.max_delay_ms),
        }
    }

    pub fn with_stop_condition(mut self, stop: StopCondition) -> Self {
        self.stop = stop;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_delay(mut self, delay: PolitenessDelay) -> Self {
        self.delay = delay;
        self
    }
}

/// Main crawler coordinator structure
///
/// Generic over the page source and page parser so either can be replaced.
pub struct Coordinator<F, P> {
    fetcher: F,
    parser: P,
    settings: CrawlSettings,
}

impl<F: Fetcher, P: PageParser> Coordinator<F, P> {
    /// Creates a new coordinator instance
    pub fn new(fetcher: F, parser: P, settings: CrawlSettings) -> Self {
        Self {
            fetcher,
            parser,
            settings,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs the main crawl loop
    ///
    /// Each iteration:
    /// 1. Fetches the current URL
    /// 2. Parses it into articles and a next-page URL
    /// 3. Appends the page's table
    /// 4. Stops if the next-page URL meets the stop condition or the page
    ///    limit is reached; otherwise sleeps for the politeness delay and
    ///    follows the next-page URL
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutput)` - The crawl reached a stopping point
    /// * `Err(ArchiveError)` - A fetch or parse failed; pages collected so far
    ///   are discarded
    pub async fn run(&self, start_url: &str) -> Result<CrawlOutput, ArchiveError> {
        let started_at = Utc::now();
        let start_time = std::time::Instant::now();
        let mut pages = Vec::new();
        let mut state = CrawlState::start(start_url);

        let termination = loop {
            let url = match &state {
                CrawlState::Running { next, .. } => next.clone(),
                CrawlState::Done(termination) => break *termination,
            };

            tracing::info!("Fetching page {}: {}", pages.len() + 1, url);

            let content = self.fetcher.fetch(&url).await?;
            let PageResult {
                articles,
                next_page_url,
            } = self.parser.parse(&content)?;

            tracing::debug!("{} articles on {}", articles.len(), url);
            pages.push(PageTable { url, articles });

            let stop_matched = self.settings.stop.matches(&next_page_url);
            state = state.after_page(next_page_url, stop_matched, self.settings.max_pages);

            if !state.is_terminal() {
                let pause = self.settings.delay.sample();
                tracing::trace!("Sleeping {:?} before next page", pause);
                tokio::time::sleep(pause).await;
            }
        };

        match termination {
            Termination::EndMarker => tracing::info!("Reached end of archive, stopping"),
            Termination::PageLimit => tracing::warn!(
                "Page limit of {} reached before end of archive",
                pages.len()
            ),
        }

        tracing::info!(
            "Crawl completed: {} pages, {} articles in {:?}",
            pages.len(),
            pages.iter().map(|p| p.articles.len()).sum::<usize>(),
            start_time.elapsed()
        );

        Ok(CrawlOutput {
            pages,
            termination,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Runs a crawl over the live site
///
/// Builds the HTTP fetcher and archive parser from `config` and walks the
/// archive from `start_url` until the configured end URL.
///
/// # Example
///
/// ```no_run
/// use pravda_archive::config::Config;
/// use pravda_archive::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let output = run_crawl(&config, "https://www.pravda.com.ua/archives/date_10092019/").await?;
/// println!("{} pages", output.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, start_url: &str) -> Result<CrawlOutput, ArchiveError> {
    let fetcher = HttpFetcher::with_default_client()?;
    let parser = ArchiveParser::from_config(config)?;
    let settings = CrawlSettings::from_config(&config.site, &config.crawler);

    Coordinator::new(fetcher, parser, settings)
        .run(start_url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_marker_exact_match() {
        let stop = StopCondition::EndMarker("https://www.pravda.com.ua/archives/".to_string());
        assert!(stop.matches("https://www.pravda.com.ua/archives/"));
        assert!(!stop.matches("https://www.pravda.com.ua/archives"));
        assert!(!stop.matches("https://www.pravda.com.ua/archives/date_09092019/"));
    }

    #[test]
    fn test_default_stop_condition() {
        assert!(StopCondition::default().matches(DEFAULT_END_URL));
    }

    #[test]
    fn test_predicate_stop_condition() {
        let stop = StopCondition::predicate(|url| url.ends_with("date_01012019/"));
        assert!(stop.matches("https://www.pravda.com.ua/archives/date_01012019/"));
        assert!(!stop.matches("https://www.pravda.com.ua/archives/date_02012019/"));
        assert_eq!(format!("{:?}", stop), "Predicate(..)");
    }

    #[test]
    fn test_delay_sample_in_range() {
        let delay = PolitenessDelay::from_millis(1000, 3000);
        for _ in 0..100 {
            let pause = delay.sample();
            assert!(pause >= Duration::from_millis(1000));
            assert!(pause < Duration::from_millis(3000));
        }
    }

    #[test]
    fn test_delay_empty_range() {
        assert_eq!(PolitenessDelay::none().sample(), Duration::ZERO);
        let fixed = PolitenessDelay::from_millis(250, 250);
        assert_eq!(fixed.sample(), Duration::from_millis(250));
    }

    #[test]
    fn test_delay_max_raised_to_min() {
        let delay = PolitenessDelay::from_millis(500, 100);
        assert_eq!(delay.max(), Duration::from_millis(500));
        assert_eq!(delay.sample(), Duration::from_millis(500));
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config::default();
        let settings = CrawlSettings::from_config(&config.site, &config.crawler);
        assert!(settings.stop.matches("https://www.pravda.com.ua/archives/"));
        assert_eq!(settings.max_pages, None);
        assert_eq!(settings.delay, PolitenessDelay::default());
    }

    #[test]
    fn test_crawl_output_counts() {
        let record = ArticleRecord {
            title: "t".to_string(),
            subtitle: "s".to_string(),
            date: "2019/09/10 14:30".to_string(),
            link: "https://www.pravda.com.ua/news/2019/09/10/1/".to_string(),
        };
        let output = CrawlOutput {
            pages: vec![
                PageTable {
                    url: "a".to_string(),
                    articles: vec![record.clone(), record.clone()],
                },
                PageTable {
                    url: "b".to_string(),
                    articles: vec![record],
                },
            ],
            termination: Termination::EndMarker,
            started_at: Utc::now(),
            finished_at: Utc::now(),
        };

        assert_eq!(output.len(), 2);
        assert_eq!(output.article_count(), 3);
        assert_eq!(output.articles().count(), 3);
        assert_eq!(output.into_tables().len(), 2);
    }
}
