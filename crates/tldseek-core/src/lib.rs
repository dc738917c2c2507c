//! # tldseek-core
//!
//! Rediscovers which top-level domain a site currently lives under.
//!
//! Sites are identified by a fixed second-level label (`example`) and a
//! validator token: literal text that only the real site serves. For every
//! site the resolver tries, in order, the caller's cached answer, TLDs scraped
//! from a fast-path index page, TLDs suggested by a lookup service, and
//! finally every TLD in the IANA list. Each layer is checked by a bounded pool
//! of concurrent HTTP probes that stops at the first confirmed match.
//!
//! ## Architecture
//!
//! - **Validator** ([`validator`]): one probe, literal substring match, no redirects
//! - **Extractors** ([`extract`]): fast-path scrape and lookup-service query
//! - **Verifier** ([`verifier`]): bounded probe pool with first-success cancellation
//! - **Resolver** ([`resolver`]): the four-layer policy for one site
//! - **Coordinator** ([`coordinator`]): bounded parallelism across sites, ordered output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tldseek_core::{CachedTlds, Config, HttpFetcher, ResolverSettings, output};
//!
//! # async fn example() -> tldseek_core::Result<()> {
//! let config = Config::from_json(r#"{"sites":[{"domain":"example","validator":"Example Domain"}]}"#)?;
//! let settings = ResolverSettings::default();
//! let fetch = Arc::new(HttpFetcher::with_timeout(settings.request_timeout)?);
//!
//! let tlds = tldseek_core::seek(&config, CachedTlds::empty(), settings, fetch).await?;
//! println!("{}", output::encode_output(&tlds));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

/// Previously resolved TLDs supplied by the caller
pub mod cache;
/// Run configuration and resolver settings
pub mod config;
/// Multi-site resolution with ordered output
pub mod coordinator;
/// Error types and result aliases
pub mod error;
/// Fast-path and lookup-service candidate extraction
pub mod extract;
/// HTTP transport
pub mod http;
/// Output encoding
pub mod output;
/// Per-site layered resolution
pub mod resolver;
/// Canonical TLD list fetching
pub mod tld_list;
/// Single-URL content validation
pub mod validator;
/// Bounded concurrent candidate probing
pub mod verifier;

#[cfg(test)]
mod test_support;

pub use cache::CachedTlds;
pub use config::{Config, ResolverSettings, Site};
pub use coordinator::Coordinator;
pub use error::{Error, Result};
pub use http::{Fetch, FetchResponse, HttpFetcher, Redirects};
pub use resolver::{Layer, Resolution, SiteResolver};
pub use validator::ProbeOutcome;
pub use verifier::TldVerifier;

/// Resolve every site in `config`.
///
/// Validates `settings`, fetches the TLD list once, then resolves all sites.
/// Returns one uppercased TLD per site in configuration order, or the first
/// fatal error.
pub async fn seek(
    config: &Config,
    cache: CachedTlds,
    settings: ResolverSettings,
    fetch: Arc<dyn Fetch>,
) -> Result<Vec<String>> {
    settings.validate()?;

    let all_tlds = tld_list::fetch_tld_list(fetch.as_ref(), &settings.tld_list_url).await?;

    let coordinator = Coordinator::new(fetch, settings, config.lookup_service.clone(), all_tlds);
    coordinator.resolve_all(&config.sites, cache).await
}
