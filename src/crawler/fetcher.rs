//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building the HTTP client with the site's User-Agent
//! - Resolving listed links against the base URL
//! - Retrying failed GETs under a `RetryPolicy`

use crate::config::{FetchConfig, SiteConfig};
use crate::crawler::retry::RetryPolicy;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors raised while fetching a single page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Gave up on {url} after {attempts} attempts: {last}")]
    RetryExhausted {
        url: String,
        attempts: u32,
        last: Box<FetchError>,
    },
}

/// Builds an HTTP client with proper configuration
///
/// No timeout is set unless `timeout-secs` is configured, leaving reqwest's
/// default in place.
pub fn build_http_client(site: &SiteConfig, fetch: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(site.user_agent.clone())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = fetch.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// GET with a fixed attempt budget
///
/// Used by both the listing and the detail phase. A `RetryExhausted` error
/// means "skip this URL", never "abort the run".
pub struct ResilientFetcher {
    client: Client,
    base_url: Url,
    policy: RetryPolicy,
}

impl ResilientFetcher {
    /// Creates a fetcher for the configured site
    pub fn new(site: &SiteConfig, fetch: &FetchConfig) -> Result<Self, crate::HarvestError> {
        let client = build_http_client(site, fetch)?;
        let base_url = Url::parse(&site.base_url)?;

        Ok(Self::with_client(client, base_url, RetryPolicy::from_config(fetch)))
    }

    pub fn with_client(client: Client, base_url: Url, policy: RetryPolicy) -> Self {
        Self {
            client,
            base_url,
            policy,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Resolves a link (absolute or relative) against the base URL
    pub fn resolve(&self, link: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(link.trim())
            .map_err(|source| FetchError::InvalidUrl {
                url: link.to_string(),
                source,
            })
    }

    /// Fetches `link` and returns the response body
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Non-2xx status | Retry after the policy's wait |
    /// | Transport error | Retry after the policy's wait |
    /// | Unparseable URL | Fail immediately |
    /// | Budget spent | `FetchError::RetryExhausted` |
    pub async fn fetch(&self, link: &str) -> Result<String, FetchError> {
        let url = self.resolve(link)?;
        let mut attempt = 1;

        loop {
            let error = match self.fetch_once(&url).await {
                Ok(body) => {
                    if attempt > 1 {
                        tracing::debug!("Fetched {} on attempt {}", url, attempt);
                    }
                    return Ok(body);
                }
                Err(e) => e,
            };

            match self.policy.delay_before_retry(attempt) {
                Some(delay) => {
                    tracing::warn!(
                        "Retrying {} in {}s (attempt {}/{} failed): {}",
                        url,
                        delay.as_secs(),
                        attempt,
                        self.policy.max_attempts,
                        error
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    return Err(FetchError::RetryExhausted {
                        url: url.to_string(),
                        attempts: attempt,
                        last: Box::new(error),
                    });
                }
            }
        }
    }

    /// One GET, with non-2xx statuses turned into errors
    async fn fetch_once(&self, url: &Url) -> Result<String, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }
}
