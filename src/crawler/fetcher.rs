//! HTTP fetcher implementation
//!
//! This module handles the one HTTP request made per archive page:
//! - Building the HTTP client
//! - A single GET per URL, returning the body bytes
//! - Carrying a `Content-Type` charset through to the parser
//!
//! No retry, caching or status-code validation happens here; a transport
//! failure ends the crawl.

use crate::crawler::charset::{charset_from_content_type, transcode_to_utf8};
use crate::ArchiveError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::future::Future;

/// Source of raw page content
///
/// The crawl driver only ever talks to this trait, so tests can substitute an
/// in-memory page chain for the network.
pub trait Fetcher {
    /// Retrieves the raw body of `url`
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ArchiveError>> + Send;
}

/// Fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher with the default client configuration
    pub fn with_default_client() -> Result<Self, ArchiveError> {
        Ok(Self::new(build_http_client()?))
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ArchiveError> {
        fetch_url(&self.client, url).await
    }
}

/// Builds the HTTP client used for archive requests
///
/// No custom headers, cookies or authentication are configured; the client
/// uses reqwest's defaults (including its redirect policy).
///
/// # Example
///
/// ```no_run
/// use pravda_archive::crawler::build_http_client;
///
/// let client = build_http_client().unwrap();
/// ```
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().build()
}

/// Fetches a URL and returns its body
///
/// # Request Flow
///
/// 1. Send a single GET request
/// 2. Log (but do not reject) a non-success status
/// 3. Read the full body as bytes
/// 4. If the response declares a charset, re-encode the body as UTF-8
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The response body
/// * `Err(ArchiveError::Http)` - DNS, connection or body read failure
pub async fn fetch_url(client: &Client, url: &str) -> Result<Vec<u8>, ArchiveError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ArchiveError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(
            "Non-success status {} for {}, parsing body anyway",
            status.as_u16(),
            url
        );
    }

    let declared = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(charset_from_content_type);

    let body = response.bytes().await.map_err(|source| ArchiveError::Http {
        url: url.to_string(),
        source,
    })?;

    tracing::debug!("Fetched {} bytes from {}", body.len(), url);

    match declared {
        Some(encoding) => {
            tracing::trace!("Decoding {} as {}", url, encoding.name());
            Ok(transcode_to_utf8(&body, encoding))
        }
        None => Ok(body.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_fetcher_with_default_client() {
        let fetcher = HttpFetcher::with_default_client().unwrap();
        assert!(format!("{:?}", fetcher).contains("HttpFetcher"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let fetcher = HttpFetcher::with_default_client().unwrap();

        // Port 9 (discard) on localhost is not expected to accept connections
        let result = fetcher.fetch("http://127.0.0.1:9/archives/").await;

        match result {
            Err(ArchiveError::Http { url, .. }) => assert_eq!(url, "http://127.0.0.1:9/archives/"),
            other => panic!("Expected HTTP error, got {:?}", other.map(|b| b.len())),
        }
    }

    // Status and body handling is covered with wiremock in tests/crawl_tests.rs
}
