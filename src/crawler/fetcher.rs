//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Error classification
//!
//! Stages never talk to reqwest directly; they go through [`PageSource`] so
//! tests can substitute canned pages and arbitrary completion delays.

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why a single page could not be fetched
///
/// A fetch error is scoped to one URL. The stage records it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The input had no URL to visit (for example a record without a website)
    #[error("No URL to fetch")]
    EmptyUrl,

    /// Connection refused, DNS failure, TLS error, malformed URL
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),

    /// The response started but the body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// No complete response within the per-fetch budget
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// Anything that can turn a URL into an HTML document body
pub trait PageSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawler` - Connection limits
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        user_agent.crawler_name, user_agent.crawler_version, user_agent.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and returns its body
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Empty URL | `EmptyUrl`, no request sent |
/// | Non-2xx status | `Status(code)` |
/// | Connect/DNS/TLS failure | `Transport` |
/// | Body read failure | `Body` |
///
/// There are no retries: a failed URL stays failed for this run.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    if url.trim().is_empty() {
        return Err(FetchError::EmptyUrl);
    }

    let response = client.get(url).send().await.map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))
}

fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Transport("Connection timed out".to_string())
    } else if e.is_connect() {
        FetchError::Transport("Connection refused".to_string())
    } else {
        FetchError::Transport(e.to_string())
    }
}

/// [`PageSource`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(crawler, user_agent)?))
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        let client = self.client.clone();
        let url = url.to_string();
        async move { fetch_page(&client, &url).await }
    }
}
