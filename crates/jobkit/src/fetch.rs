//! Page fetcher for job postings and careers pages
//!
//! Fetches a URL with a browser-like User-Agent, rejects binary bodies and
//! error statuses, and reduces HTML to the text a model should read.

use crate::convert::{extract_title, filter_excessive_newlines, html_to_text, is_html};
use crate::error::FetchError;
use crate::types::JobPosting;
use crate::BROWSER_USER_AGENT;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Binary content type prefixes
const BINARY_PREFIXES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
    "application/gzip",
    "application/x-tar",
    "application/vnd.ms-",
    "application/vnd.openxmlformats",
    "font/",
];

/// Default timeout for connecting, each read, and the whole body
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(25);

/// Fetch settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// User-Agent header value
    pub user_agent: String,
    /// Connect, read and body timeout
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// HTTP fetcher producing [`JobPosting`] values
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    options: FetchOptions,
}

impl PageFetcher {
    /// Build a fetcher
    pub fn new(options: FetchOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&options.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(BROWSER_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html, application/xhtml+xml, text/plain;q=0.9, */*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(options.timeout)
            .read_timeout(options.timeout)
            .build()
            .map_err(FetchError::ClientBuildError)?;

        Ok(Self { client, options })
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Fetch `url` and extract its readable text
    pub async fn fetch(&self, url: &str) -> Result<JobPosting, FetchError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(FetchError::InvalidUrlScheme);
        }
        url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        debug!(url, "Fetching page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        if let Some(ref ct) = content_type {
            if is_binary_content_type(ct) {
                return Err(FetchError::BinaryContent {
                    content_type: ct.clone(),
                });
            }
        }

        let body = read_body_with_timeout(response, self.options.timeout).await?;
        let raw = String::from_utf8_lossy(&body).to_string();

        let (title, text) = if is_html(&content_type, &raw) {
            (extract_title(&raw), html_to_text(&raw))
        } else {
            (None, filter_excessive_newlines(raw.trim()))
        };

        debug!(
            url,
            bytes = body.len(),
            chars = text.chars().count(),
            "Extracted page text"
        );

        Ok(JobPosting {
            url: url.to_string(),
            status_code: status.as_u16(),
            content_type,
            title,
            raw,
            text,
        })
    }
}

/// Check if content type indicates binary content
fn is_binary_content_type(content_type: &str) -> bool {
    let ct_lower = content_type.to_lowercase();
    BINARY_PREFIXES
        .iter()
        .any(|prefix| ct_lower.starts_with(prefix))
}

/// Read the response body within `timeout`
///
/// A stalled or broken body fails the fetch; partial pages are never returned.
async fn read_body_with_timeout(
    response: reqwest::Response,
    timeout: Duration,
) -> Result<Bytes, FetchError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let chunk_future = stream.next();
        let timeout_future = tokio::time::sleep_until(deadline);

        tokio::select! {
            chunk = chunk_future => {
                match chunk {
                    Some(Ok(bytes)) => {
                        body.extend_from_slice(&bytes);
                    }
                    Some(Err(e)) => {
                        error!(received = body.len(), "Error reading body chunk: {}", e);
                        return Err(FetchError::from_reqwest(e));
                    }
                    None => {
                        return Ok(Bytes::from(body));
                    }
                }
            }
            _ = timeout_future => {
                warn!(received = body.len(), "Body timeout reached");
                return Err(FetchError::Timeout);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_binary_content_type() {
        assert!(is_binary_content_type("image/png"));
        assert!(is_binary_content_type("application/pdf"));
        assert!(is_binary_content_type("application/octet-stream"));
        assert!(is_binary_content_type("application/vnd.ms-excel"));
        assert!(is_binary_content_type("font/woff2"));

        assert!(!is_binary_content_type("text/html"));
        assert!(!is_binary_content_type("text/plain"));
        assert!(!is_binary_content_type("application/json"));
    }

    #[test]
    fn test_fetch_options_default() {
        let options = FetchOptions::default();
        assert_eq!(options.user_agent, BROWSER_USER_AGENT);
        assert_eq!(options.timeout, DEFAULT_FETCH_TIMEOUT);
    }

    #[tokio::test]
    async fn test_fetch_invalid_scheme() {
        let fetcher = PageFetcher::new(FetchOptions::default()).unwrap();
        let result = fetcher.fetch("ftp://example.com/jobs").await;
        assert!(matches!(result, Err(FetchError::InvalidUrlScheme)));
    }

    #[tokio::test]
    async fn test_fetch_unparseable_url() {
        let fetcher = PageFetcher::new(FetchOptions::default()).unwrap();
        let result = fetcher.fetch("https://exa mple.com/jobs").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
