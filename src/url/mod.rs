//! URL handling module for Pravda-Archive
//!
//! This module provides href-to-absolute resolution against the site's base
//! URL and extraction of the `YYYY/M/D` date segment embedded in article links.

mod date;
mod resolve;

// Re-export main functions
pub use date::{extract_date, find_date_segment, DateField, MISSING_DATE};
pub use resolve::{absolutize, is_http_url};
