//! Date extraction from article links
//!
//! Article URLs on the archive carry their publication date as a path
//! segment (`/news/2019/09/10/7225622/`). The listing only shows the time of
//! day, so the two are joined to form the record's `date` field.

use once_cell::sync::Lazy;
use regex::Regex;

static DATE_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}/\d{1,2}/\d{1,2}").expect("date pattern is valid"));

/// Prefix used when a link carries no date segment
pub const MISSING_DATE: &str = "missing date";

/// Result of joining a link's date segment with the listed time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateField {
    /// `"<YYYY/M/D> <time>"` or `"missing date <time>"`
    pub value: String,

    /// True when the link had no date segment and the sentinel was used
    pub is_fallback: bool,
}

/// Returns the first `YYYY/M/D`-shaped substring of `href`, if any
pub fn find_date_segment(href: &str) -> Option<&str> {
    DATE_SEGMENT.find(href).map(|m| m.as_str())
}

/// Builds the `date` field for an article
///
/// Never fails: a link without a date segment degrades to
/// `"missing date <time>"` with `is_fallback` set.
///
/// # Examples
///
/// ```
/// use pravda_archive::url::extract_date;
///
/// let date = extract_date("/articles/2019/09/10/7225622/", "14:30");
/// assert_eq!(date.value, "2019/09/10 14:30");
/// assert!(!date.is_fallback);
///
/// let date = extract_date("https://www.eurointegration.com.ua/rus/", "09:05");
/// assert_eq!(date.value, "missing date 09:05");
/// assert!(date.is_fallback);
/// ```
pub fn extract_date(href: &str, time: &str) -> DateField {
    match find_date_segment(href) {
        Some(segment) => DateField {
            value: format!("{} {}", segment, time),
            is_fallback: false,
        },
        None => DateField {
            value: format!("{} {}", MISSING_DATE, time),
            is_fallback: true,
        },
    }
}
