//! HTTP client for the published product feed.
//!
//! Uses `reqwest` with a request timeout taken from [`FeedConfig`]; an
//! unanswered fetch would otherwise stall every reload forever.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::{FeedError, ParsedFeed, parse_feed};
use crate::config::FeedConfig;

const USER_AGENT: &str = concat!("sheetshop/", env!("CARGO_PKG_VERSION"));

/// Client for the product feed.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct FeedClient {
    inner: Arc<FeedClientInner>,
}

struct FeedClientInner {
    client: reqwest::Client,
    url: SecretString,
    timeout: Duration,
}

impl std::fmt::Debug for FeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedClient")
            .field("url", &"[REDACTED]")
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl FeedClient {
    /// Create a new feed client.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: Arc::new(FeedClientInner {
                client,
                url: config.url.clone(),
                timeout: config.timeout,
            }),
        })
    }

    /// The configured request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Fetch the raw feed body.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Timeout`] if the host does not answer in time
    /// - [`FeedError::RateLimited`] on HTTP 429
    /// - [`FeedError::UnexpectedStatus`] on any other non-success status
    /// - [`FeedError::Http`] for transport failures
    #[instrument(skip(self), fields(timeout = ?self.inner.timeout))]
    pub async fn fetch_text(&self) -> Result<String, FeedError> {
        let response = self
            .inner
            .client
            .get(self.inner.url.expose_secret())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(FeedError::RateLimited(retry_after));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Feed host returned non-success status"
            );
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        tracing::debug!(bytes = body.len(), "Fetched feed");
        Ok(body)
    }

    /// Fetch and parse the feed.
    ///
    /// # Errors
    ///
    /// Any error from [`FeedClient::fetch_text`] or [`parse_feed`].
    pub async fn load(&self) -> Result<ParsedFeed, FeedError> {
        let body = self.fetch_text().await?;
        parse_feed(&body)
    }

    fn classify(&self, err: reqwest::Error) -> FeedError {
        if err.is_timeout() {
            FeedError::Timeout(self.inner.timeout)
        } else {
            FeedError::Http(err)
        }
    }
}
