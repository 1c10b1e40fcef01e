//! HTML parser for archive listing pages
//!
//! This module turns one archive listing page into:
//! - The ordered list of article records on the page
//! - The absolute URL of the next page in the archive

use crate::config::{compile_selector, Config, SelectorConfig, SiteConfig};
use crate::crawler::charset::decode_html;
use crate::url::{absolutize, extract_date};
use crate::{ArchiveError, ConfigError};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Metadata of a single article on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    pub title: String,
    pub subtitle: String,
    /// `"YYYY/M/D HH:MM"`, or `"missing date HH:MM"` when the link has no date
    pub date: String,
    /// Absolute article URL
    pub link: String,
}

/// Everything extracted from one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// Articles in document order
    pub articles: Vec<ArticleRecord>,

    /// Absolute URL of the next archive page
    pub next_page_url: String,
}

/// Turns raw page content into a [`PageResult`]
pub trait PageParser {
    fn parse(&self, content: &[u8]) -> Result<PageResult, ArchiveError>;
}

/// A compiled selector together with its source text, kept for error messages
#[derive(Debug, Clone)]
struct CompiledSelector {
    css: String,
    selector: Selector,
}

impl CompiledSelector {
    fn new(css: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            css: css.to_string(),
            selector: compile_selector(css)?,
        })
    }

    fn first<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        element.select(&self.selector).next()
    }

    fn missing(&self) -> ArchiveError {
        ArchiveError::MissingElement {
            selector: self.css.clone(),
        }
    }
}

/// Parser for `pravda.com.ua` archive listing pages
///
/// All selectors are compiled once when the parser is built.
#[derive(Debug, Clone)]
pub struct ArchiveParser {
    base_url: String,
    next_page: CompiledSelector,
    articles: CompiledSelector,
    anchor: CompiledSelector,
    time: CompiledSelector,
    subtitle: CompiledSelector,
}

impl ArchiveParser {
    /// Builds a parser from site and selector settings
    ///
    /// # Returns
    ///
    /// * `Ok(ArchiveParser)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - A selector failed to compile
    pub fn new(site: &SiteConfig, selectors: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: site.base_url.clone(),
            next_page: CompiledSelector::new(&selectors.next_page)?,
            articles: CompiledSelector::new(&selectors.articles)?,
            anchor: CompiledSelector::new("a")?,
            time: CompiledSelector::new(&selectors.time)?,
            subtitle: CompiledSelector::new(&selectors.subtitle)?,
        })
    }

    /// Builds a parser from a full configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(&config.site, &config.selectors)
    }

    /// Parses a listing page given as text
    ///
    /// # Extraction Rules
    ///
    /// 1. The next-page link must exist and carry an `href`; otherwise the
    ///    page structure is considered broken and parsing fails
    /// 2. Every match of the article selector is one article, in document order
    /// 3. Within an article, the first `<a>` supplies the title and link, the
    ///    time element the time of day and the subtitle element the subtitle
    /// 4. A link without a `YYYY/M/D` segment yields `"missing date <time>"`;
    ///    a missing subtitle fails the whole page
    ///
    /// # Example
    ///
    /// ```
    /// use pravda_archive::config::Config;
    /// use pravda_archive::crawler::ArchiveParser;
    ///
    /// let html = r#"<div class="archive-navigation">
    ///   <a class="button button_next" href="/archives/date_09092019/">next</a>
    /// </div>
    /// <div class="news news_all">
    ///   <div>
    ///     <div class="article__time">14:30</div>
    ///     <a href="/news/2019/09/10/7225622/">Headline</a>
    ///     <div class="article__subtitle">Lead</div>
    ///   </div>
    /// </div>"#;
    ///
    /// let parser = ArchiveParser::from_config(&Config::default()).unwrap();
    /// let page = parser.parse_html(html).unwrap();
    /// assert_eq!(page.next_page_url, "https://www.pravda.com.ua/archives/date_09092019/");
    /// assert_eq!(page.articles[0].date, "2019/09/10 14:30");
    /// ```
    pub fn parse_html(&self, html: &str) -> Result<PageResult, ArchiveError> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let next_page_url = self.extract_next_page(root)?;

        let articles = root
            .select(&self.articles.selector)
            .enumerate()
            .map(|(index, fragment)| self.extract_article(index, fragment))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Parsed {} articles, next page: {}",
            articles.len(),
            next_page_url
        );

        Ok(PageResult {
            articles,
            next_page_url,
        })
    }

    /// Finds the next-page control and resolves its href
    fn extract_next_page(&self, root: ElementRef<'_>) -> Result<String, ArchiveError> {
        let control = self
            .next_page
            .first(root)
            .ok_or_else(|| self.next_page.missing())?;

        let href = control
            .value()
            .attr("href")
            .ok_or_else(|| ArchiveError::MissingAttribute {
                selector: self.next_page.css.clone(),
                attribute: "href".to_string(),
            })?;

        Ok(absolutize(&self.base_url, href))
    }

    /// Extracts one article record from its markup fragment
    fn extract_article(
        &self,
        index: usize,
        fragment: ElementRef<'_>,
    ) -> Result<ArticleRecord, ArchiveError> {
        let anchor = self
            .anchor
            .first(fragment)
            .ok_or_else(|| self.anchor.missing())?;

        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| ArchiveError::MissingAttribute {
                selector: self.anchor.css.clone(),
                attribute: "href".to_string(),
            })?;

        let news_time = self
            .time
            .first(fragment)
            .map(element_text)
            .ok_or_else(|| self.time.missing())?;

        let date = extract_date(href, &news_time);
        if date.is_fallback {
            tracing::debug!("Article #{} link has no date segment: {}", index, href);
        }

        let subtitle = self
            .subtitle
            .first(fragment)
            .map(element_text)
            .ok_or(ArchiveError::MissingSubtitle { index })?;

        Ok(ArticleRecord {
            title: element_text(anchor),
            subtitle,
            date: date.value,
            link: absolutize(&self.base_url, href),
        })
    }
}

impl PageParser for ArchiveParser {
    fn parse(&self, content: &[u8]) -> Result<PageResult, ArchiveError> {
        self.parse_html(&decode_html(content))
    }
}

/// Concatenated text of an element, trimmed
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
