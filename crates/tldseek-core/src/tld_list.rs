//! The canonical TLD list.
//!
//! Fetched once per run before any site is resolved. Any failure here is
//! fatal: resolving against an empty or partial list would silently turn the
//! exhaustive layer into a no-op.

use crate::http::{Fetch, Redirects};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::info;

/// Fetch and parse the TLD list at `url`.
pub async fn fetch_tld_list(fetch: &dyn Fetch, url: &str) -> Result<Arc<[String]>> {
    let response = fetch.get(url, Redirects::Follow).await?;
    if !response.is_success() {
        return Err(Error::Status {
            status: response.status,
            url: url.to_string(),
        });
    }

    let tlds = parse_tld_list(&response.body);
    if tlds.is_empty() {
        return Err(Error::TldList(format!("no TLDs listed at '{url}'")));
    }

    info!(count = tlds.len(), "Fetched TLD list");
    Ok(tlds.into())
}

/// One TLD per line; `#` comments (the IANA version header) and blank lines
/// are skipped.
pub fn parse_tld_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_ascii_uppercase)
        .collect()
}
