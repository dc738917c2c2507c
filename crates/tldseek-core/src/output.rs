//! Run output encoding.

use crate::cache::SEPARATOR;
use base64::{Engine, engine::general_purpose::STANDARD};

/// Join per-site TLDs with `|`.
pub fn join_tlds(tlds: &[String]) -> String {
    tlds.join(&SEPARATOR.to_string())
}

/// Joined TLDs, base64-encoded. This is the value callers feed back as the
/// next run's cache.
///
/// ```rust
/// use tldseek_core::output::encode_output;
///
/// assert_eq!(encode_output(&["DEV".to_string()]), "REVW");
/// ```
pub fn encode_output(tlds: &[String]) -> String {
    STANDARD.encode(join_tlds(tlds))
}
