//! HTTP fetch seam
//!
//! Feeds talk to the network through the [`Fetch`] trait so their parsing
//! and state transitions are testable without a server.

use std::time::Duration;

use xrpool_core::{FeedError, FeedResult};

/// Base trait for feed transports
#[async_trait::async_trait]
pub trait Fetch: Send + Sync {
    /// GET the URL and return the response body as text.
    ///
    /// Non-2xx statuses are an error; transports must not serve cached
    /// responses.
    async fn get_text(&self, url: &str) -> FeedResult<String>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpFetch {
    client: reqwest::Client,
}

impl HttpFetch {
    /// Default request timeout; an unanswered request would otherwise pin
    /// its generation open indefinitely.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetch for HttpFetch {
    async fn get_text(&self, url: &str) -> FeedResult<String> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(reqwest::header::PRAGMA, "no-cache")
            .send()
            .await
            .map_err(FeedError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Http {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(FeedError::network)
    }
}

/// Append a cache-busting query parameter so intermediaries never serve a
/// stale export.
pub fn cache_busted(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}cachebust={}",
        url,
        separator,
        chrono::Utc::now().timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_timeout() {
        assert!(HttpFetch::new(HttpFetch::DEFAULT_TIMEOUT).is_ok());
    }

    #[test]
    fn test_cache_busted_separator() {
        let plain = cache_busted("https://example.com/data.csv");
        assert!(plain.starts_with("https://example.com/data.csv?cachebust="));

        let with_query = cache_busted("https://example.com/export?gid=0");
        assert!(with_query.starts_with("https://example.com/export?gid=0&cachebust="));
    }
}
