use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout for probes and extractor fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether a request may follow HTTP redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirects {
    /// Follow redirects (trusted index pages, the TLD list).
    Follow,
    /// Return the first response as-is, even if it is a 3xx.
    Deny,
}

/// Status and body of a completed GET.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code of the final response.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl FetchResponse {
    /// Whether the status is in the 2xx range.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport used by the validator, the extractors and the TLD list fetcher.
///
/// Implementations report transport failures as `Err`; callers decide whether
/// that is fatal.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issue a GET to `url`.
    async fn get(&self, url: &str, redirects: Redirects) -> Result<FetchResponse>;
}

/// reqwest-backed [`Fetch`] implementation.
///
/// Holds two clients sharing one timeout, since reqwest fixes the redirect
/// policy at client construction.
pub struct HttpFetcher {
    direct: Client,
    following: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the default 5 second timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a fetcher with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let direct = Self::builder(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(Error::Network)?;
        let following = Self::builder(timeout)
            .redirect(Policy::limited(10))
            .build()
            .map_err(Error::Network)?;
        Ok(Self { direct, following })
    }

    fn builder(timeout: Duration) -> reqwest::ClientBuilder {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tldseek/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &str, redirects: Redirects) -> Result<FetchResponse> {
        let client = match redirects {
            Redirects::Follow => &self.following,
            Redirects::Deny => &self.direct,
        };

        let response = client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(url, status, bytes = body.len(), "fetched");

        Ok(FetchResponse { status, body })
    }
}

// Note: Default is not implemented as HttpFetcher::new() can fail.
