//! Output module for presenting crawl results
//!
//! The crawler itself only returns tables in memory. This module holds the
//! caller-side helpers used by the command-line tool:
//! - Summarising a crawl as statistics
//! - Rendering the per-page tables as a markdown document

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, CrawlStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
