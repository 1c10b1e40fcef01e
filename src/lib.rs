//! Pravda-Archive: a paginating news archive scraper
//!
//! This crate walks the archive listing pages of `pravda.com.ua`, extracts
//! article metadata (title, subtitle, date, link) from every page and collects
//! one table per page until the "next page" link reaches the archive root.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Pravda-Archive operations
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Expected element not found: {selector}")]
    MissingElement { selector: String },

    #[error("Element {selector} has no '{attribute}' attribute")]
    MissingAttribute { selector: String, attribute: String },

    #[error("Article #{index} has no subtitle")]
    MissingSubtitle { index: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Result type alias for Pravda-Archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, ArticleRecord, CrawlOutput, PageResult, PageTable};
pub use state::{CrawlState, Termination};
pub use crate::url::{absolutize, extract_date, DateField};
