//! State module for tracking crawl progress
//!
//! - `CrawlState`: Running with the next URL to fetch, or Done
//! - `Termination`: why a finished crawl stopped

mod crawl_state;

// Re-export main types
pub use crawl_state::{CrawlState, Termination};
