//! Live source adapter with a uniform degrade-to-empty contract.
//!
//! The provider is treated as a black box that, given a URL, either
//! returns a JSON array of raw items or nothing usable. Transport
//! errors, timeouts, non-success statuses, and unparseable bodies are
//! all collapsed into an empty batch — callers branch on "is the batch
//! non-empty" and nothing else, which is what makes the cache fallback
//! a single decision point in every resolver.

pub mod endpoints;

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub use endpoints::Endpoints;

/// A raw item as reported by the live source, before identity
/// assignment. Missing fields deserialize to empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCandidate {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub poster: String,

    #[serde(default)]
    pub video: String,
}

/// Capability interface over the live content provider.
///
/// Implementations must be swappable without touching the resolver;
/// the transport behind `fetch` (plain HTTP, browser automation,
/// scraping) is irrelevant to callers.
#[async_trait]
pub trait LiveSource: Send + Sync {
    /// Fetch raw candidates from the given URL.
    ///
    /// Never fails: any error yields an empty batch.
    async fn fetch(&self, url: &str) -> Vec<RawCandidate>;
}

/// Configuration for the HTTP live source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// User agent string (default: "streambox/0.1")
    pub user_agent: String,

    /// Request timeout (default: 30s)
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { user_agent: "streambox/0.1".to_string(), timeout: Duration::from_millis(30_000) }
    }
}

/// Live source over plain HTTP, expecting JSON-array responses.
#[derive(Debug, Clone)]
pub struct HttpLiveSource {
    http: reqwest::Client,
}

impl HttpLiveSource {
    /// Create a new live source client with the given configuration.
    pub fn new(config: SourceConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl LiveSource for HttpLiveSource {
    async fn fetch(&self, url: &str) -> Vec<RawCandidate> {
        let response = match self.http.get(url).header("Accept", "application/json").send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("live fetch failed for {url}: {e}");
                return Vec::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("live fetch for {url} returned status {status}");
            return Vec::new();
        }

        match response.json::<Vec<RawCandidate>>().await {
            Ok(items) => {
                tracing::debug!("live fetch for {url} returned {} items", items.len());
                items
            }
            Err(e) => {
                tracing::warn!("live fetch for {url} returned unparseable body: {e}");
                Vec::new()
            }
        }
    }
}
