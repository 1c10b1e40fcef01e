use serde::Deserialize;

/// Default site root
pub const DEFAULT_BASE_URL: &str = "https://www.pravda.com.ua";

/// Default end marker: the archive root the last page links back to
pub const DEFAULT_END_URL: &str = "https://www.pravda.com.ua/archives/";

/// Main configuration structure for Pravda-Archive
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub crawler: CrawlerConfig,
}

/// Source site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix applied to site-relative hrefs
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Crawling stops once a page's next link equals this URL
    #[serde(rename = "end-url")]
    pub end_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            end_url: DEFAULT_END_URL.to_string(),
        }
    }
}

/// CSS selectors describing the listing page markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// The "next page" link inside the archive navigation
    #[serde(rename = "next-page")]
    pub next_page: String,

    /// One match per article fragment
    pub articles: String,

    /// Time of day, relative to an article fragment
    pub time: String,

    /// Subtitle, relative to an article fragment
    pub subtitle: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            next_page: "div.archive-navigation > a.button.button_next".to_string(),
            articles: "div.news.news_all > div".to_string(),
            time: ".article__time".to_string(),
            subtitle: ".article__subtitle".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Lower bound of the pause between page requests (milliseconds)
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Upper bound (exclusive) of the pause between page requests (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,

    /// Safety bound on the number of pages fetched in one crawl
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            max_delay_ms: 3000,
            max_pages: None,
        }
    }
}
