//! HTTP transport seam.
//!
//! Scrapers only need "fetch the text behind a URL". That capability is the
//! [`FetchText`] trait, so the parsing and batching logic can run against a
//! canned fetcher in tests and against [`HttpFetcher`] in production.

use crate::config::Config;
use crate::error::{CalendarError, Result};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// A fetched document: HTTP status plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedText {
    pub status: u16,
    pub body: String,
}

impl FetchedText {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body, or [`CalendarError::HttpStatus`] when the status is not 2xx.
    pub fn into_success_body(self, url: &str) -> Result<String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            warn!(%url, status = self.status, "Origin returned non-success status");
            Err(CalendarError::HttpStatus {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// Fetch the text behind a URL.
///
/// Implementations fail with [`CalendarError::Network`] on transport errors
/// only; a non-2xx answer is still a successful fetch.
pub trait FetchText {
    async fn fetch_text(&self, url: &str) -> Result<FetchedText>;
}

/// [`FetchText`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the configured user agent and request timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| CalendarError::Network {
                url: config.base_url.clone(),
                source,
            })?;
        Ok(Self { client })
    }
}

impl FetchText for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch_text(&self, url: &str) -> Result<FetchedText> {
        let t0 = Instant::now();
        let network = |source| CalendarError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network)?;

        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched document"
        );
        Ok(FetchedText { status, body })
    }
}
