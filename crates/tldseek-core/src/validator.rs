//! Single-URL content validation.
//!
//! A probe fetches a candidate URL without following redirects and checks the
//! body for the site's validator token. Following redirects would let an
//! unrelated domain's landing page vouch for the probed TLD.

use crate::http::{Fetch, Redirects};
use tracing::trace;

/// Outcome of one candidate probe.
///
/// `Failed` counts as "no evidence" exactly like `NotMatched`; it is kept
/// separate so transport trouble stays visible in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The body contained the validator token.
    Matched,
    /// The server answered but the token was absent.
    NotMatched,
    /// The request did not complete (timeout, refused, DNS, TLS).
    Failed(String),
}

impl ProbeOutcome {
    /// Whether the probe confirmed the candidate.
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched)
    }
}

/// Probe `url` and look for `token` in the response body.
pub async fn probe(fetch: &dyn Fetch, url: &str, token: &str) -> ProbeOutcome {
    match fetch.get(url, Redirects::Deny).await {
        Ok(response) if body_matches(&response.body, token) => ProbeOutcome::Matched,
        Ok(response) => {
            trace!(url, status = response.status, "validator token absent");
            ProbeOutcome::NotMatched
        },
        Err(err) => {
            trace!(url, error = %err, "probe failed");
            ProbeOutcome::Failed(err.to_string())
        },
    }
}

/// Literal substring test; the token is never interpreted as a pattern.
pub fn body_matches(body: &str, token: &str) -> bool {
    body.contains(token)
}
