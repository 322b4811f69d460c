//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with transport timeouts and decompression
//! - Single-attempt GET requests with headers from the politeness policy
//! - Error classification
//!
//! There is no retry. Callers decide whether a failure aborts the run.

use crate::config::FetcherConfig;
use crate::crawler::politeness::PolitenessPolicy;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// A failed request
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// The request never produced a usable response (timeout, DNS, reset, body read)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// URL of the failed request
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Transport { url, .. } => url,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_connect())
    }

    /// Short label for log output
    pub fn kind(&self) -> &'static str {
        if self.is_timeout() {
            "timeout"
        } else if self.is_connect() {
            "connection failed"
        } else {
            match self {
                Self::Status { .. } => "bad status",
                Self::Transport { .. } => "transport error",
            }
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The User-Agent is not set here: it changes per request and is supplied
/// by the politeness policy.
///
/// # Example
///
/// ```no_run
/// use jobscrape::config::FetcherConfig;
/// use jobscrape::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
}

/// Issues GET requests with a fresh header set per request
pub struct Fetcher {
    client: Client,
    policy: Arc<dyn PolitenessPolicy>,
}

impl Fetcher {
    /// Creates a fetcher from transport settings and a politeness policy
    pub fn new(
        config: &FetcherConfig,
        policy: Arc<dyn PolitenessPolicy>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            policy,
        })
    }

    /// Fetches a URL and returns the response body
    ///
    /// # Errors
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Non-2xx status | `FetchError::Status` |
    /// | Timeout, DNS, connection refused/reset | `FetchError::Transport` |
    /// | Body could not be read | `FetchError::Transport` |
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let headers = self.policy.next_headers();

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
