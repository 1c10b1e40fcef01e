//! Configuration module for Pravda-Archive
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; an absent file means the built-in defaults for
//! `pravda.com.ua` are used.
//!
//! # Example
//!
//! ```no_run
//! use pravda_archive::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("archive.toml")).unwrap();
//! println!("Crawl stops at: {}", config.site.end_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, SelectorConfig, SiteConfig, DEFAULT_BASE_URL, DEFAULT_END_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{compile_selector, validate};
