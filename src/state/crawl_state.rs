//! Crawl state definitions for the archive walk
//!
//! A crawl is a two-state machine: it is `Running` with a URL to fetch next,
//! or `Done` with the reason it stopped.

use std::fmt;

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The next-page link matched the stop condition (normally the archive root)
    EndMarker,

    /// The configured page limit was reached before the end marker
    PageLimit,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndMarker => "end_marker",
            Self::PageLimit => "page_limit",
        }
    }

    /// Returns true if the archive was walked all the way to the end marker
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::EndMarker)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the current state of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlState {
    /// More pages remain; `next` is fetched on the following iteration
    Running {
        next: String,
        pages_fetched: usize,
    },

    /// No further pages will be fetched
    Done(Termination),
}

impl CrawlState {
    /// Initial state for a crawl starting at `start_url`
    pub fn start(start_url: impl Into<String>) -> Self {
        Self::Running {
            next: start_url.into(),
            pages_fetched: 0,
        }
    }

    /// Returns true once the crawl has stopped
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Transition taken after a page has been fetched, parsed and appended
    ///
    /// The stop condition takes precedence over the page limit, so a crawl
    /// whose last allowed page links to the end marker still reports
    /// `EndMarker`. Calling this on a `Done` state leaves it unchanged.
    ///
    /// # Arguments
    ///
    /// * `next_page_url` - The next-page link parsed from the page just appended
    /// * `stop_matched` - Whether `next_page_url` satisfies the stop condition
    /// * `max_pages` - Optional bound on the number of pages fetched
    pub fn after_page(
        self,
        next_page_url: String,
        stop_matched: bool,
        max_pages: Option<usize>,
    ) -> Self {
        let pages_fetched = match self {
            Self::Running { pages_fetched, .. } => pages_fetched + 1,
            done @ Self::Done(_) => return done,
        };

        if stop_matched {
            return Self::Done(Termination::EndMarker);
        }

        if max_pages.is_some_and(|limit| pages_fetched >= limit) {
            return Self::Done(Termination::PageLimit);
        }

        Self::Running {
            next: next_page_url,
            pages_fetched,
        }
    }
}
