use url::Url;

/// Makes an href absolute by prefixing the site's base URL
///
/// # Resolution Rules
///
/// - `/path` (site-relative) → `base_url` + `/path`; a trailing slash on the
///   base is not duplicated
/// - `//host/path` (protocol-relative) → the base URL's scheme is prepended
/// - anything else is assumed to be absolute already and returned unchanged
///
/// # Arguments
///
/// * `base_url` - The site root, e.g. `https://www.pravda.com.ua`
/// * `href` - The raw `href` attribute value
///
/// # Examples
///
/// ```
/// use pravda_archive::url::absolutize;
///
/// let base = "https://www.pravda.com.ua";
/// assert_eq!(absolutize(base, "/news/123"), "https://www.pravda.com.ua/news/123");
/// assert_eq!(absolutize(base, "https://life.pravda.com.ua/x"), "https://life.pravda.com.ua/x");
/// ```
pub fn absolutize(base_url: &str, href: &str) -> String {
    let href = href.trim();

    if href.starts_with("//") {
        let scheme = Url::parse(base_url)
            .map(|url| url.scheme().to_string())
            .unwrap_or_else(|_| "https".to_string());
        return format!("{}:{}", scheme, href);
    }

    if href.starts_with('/') {
        return format!("{}{}", base_url.trim_end_matches('/'), href);
    }

    href.to_string()
}

/// Returns true if the string parses as an absolute HTTP or HTTPS URL
pub fn is_http_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| url.scheme() == "http" || url.scheme() == "https")
        .unwrap_or(false)
}
