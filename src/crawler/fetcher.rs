//! HTTP fetcher implementation
//!
//! The crawl engine talks to the network through the [`Fetcher`] trait so
//! tests can substitute a scripted transport. The production implementation
//! wraps a single shared reqwest client and retries transient failures.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Maximum attempts for one URL when the failure looks transient
const MAX_RETRIES: u32 = 5;

/// Result of fetching one URL
///
/// Never an `Err`: a failed fetch is local to its URL and the worker loop
/// absorbs it, so the outcome is data, not an error to propagate.
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with its body
    Success { body: String },
    /// Non-success status after retries were exhausted or ruled out
    HttpError { status: u16 },
    /// Connection, timeout, or protocol failure
    NetworkError { error: String },
}

/// The network capability used by workers
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches one URL to completion, including any internal retries
    async fn fetch(&self, url: &Url) -> FetchOutcome;
}

/// Production fetcher on a shared reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client()?,
        })
    }
}

/// Builds the HTTP client all workers share
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("spinneret/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Statuses worth retrying: request timeout, rate limit, bad gateway,
/// service unavailable, gateway timeout
fn is_transient(status: StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 429 | 502 | 503 | 504)
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        let mut attempt = 1;
        loop {
            let response = match self.client.get(url.clone()).send().await {
                Ok(response) => response,
                Err(e) => {
                    let error = if e.is_timeout() {
                        "request timeout".to_string()
                    } else if e.is_connect() {
                        "connection failed".to_string()
                    } else {
                        e.to_string()
                    };
                    return FetchOutcome::NetworkError { error };
                }
            };

            let status = response.status();

            if status.is_success() {
                return match response.text().await {
                    Ok(body) => FetchOutcome::Success { body },
                    Err(e) => FetchOutcome::NetworkError {
                        error: e.to_string(),
                    },
                };
            }

            if is_transient(status) && attempt < MAX_RETRIES {
                tracing::warn!("Transient HTTP {} for {}, retrying", status, url);
                // Linear backoff: 1s, 2s, 3s, 4s
                tokio::time::sleep(Duration::from_secs(attempt as u64)).await;
                attempt += 1;
                continue;
            }

            return FetchOutcome::HttpError {
                status: status.as_u16(),
            };
        }
    }
}
