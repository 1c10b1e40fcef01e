//! Crawler module for archive page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of archive listing pages
//! - HTML parsing and article extraction
//! - Overall crawl coordination and the politeness delay

mod charset;
mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{
    run_crawl, Coordinator, CrawlOutput, CrawlSettings, PageTable, PolitenessDelay,
    StopCondition,
};
pub use charset::{charset_from_content_type, decode_html};
pub use fetcher::{build_http_client, fetch_url, Fetcher, HttpFetcher};
pub use parser::{ArchiveParser, ArticleRecord, PageParser, PageResult};

use crate::config::Config;
use crate::ArchiveError;

/// Runs a complete crawl operation
///
/// This is the main entry point for walking the archive. It will:
/// 1. Build the HTTP client and page parser from `config`
/// 2. Fetch and parse pages starting at `start_url`
/// 3. Follow next-page links until the end URL (or the page limit)
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `start_url` - First archive page, e.g. `https://www.pravda.com.ua/archives/date_10092019/`
///
/// # Returns
///
/// * `Ok(CrawlOutput)` - One table per fetched page, in fetch order
/// * `Err(ArchiveError)` - Crawl failed
pub async fn crawl(config: &Config, start_url: &str) -> Result<CrawlOutput, ArchiveError> {
    run_crawl(config, start_url).await
}
