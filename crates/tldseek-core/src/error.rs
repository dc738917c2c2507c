//! Error types and handling for tldseek-core operations.
//!
//! Only the conditions that must abort a run are represented here. Expected
//! per-probe failures (a TLD that does not exist, a host that times out) never
//! become an [`Error`]; they are folded into
//! [`ProbeOutcome`](crate::validator::ProbeOutcome) and treated as "no evidence".
//!
//! ## Error Categories
//!
//! - **Network Errors**: HTTP transport failures on fetches that must succeed
//! - **Status Errors**: non-success HTTP status on fetches that must succeed
//! - **Configuration Errors**: malformed `CONFIG`/`CACHE` payloads or settings
//! - **TLD List Errors**: the canonical TLD list could not be obtained
//! - **Unresolved Sites**: every resolution layer was exhausted for a site
//!
//! ## Recovery Hints
//!
//! ```rust
//! use tldseek_core::Error;
//!
//! let err = Error::Unresolved { position: 2 };
//! assert!(!err.is_recoverable());
//! assert_eq!(err.category(), "unresolved");
//! ```

use thiserror::Error;

/// The main error type for tldseek-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Network operation failed.
    ///
    /// Raised only by fetches whose failure is fatal (the TLD list). Probe and
    /// extractor transport failures are recovered where they happen.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status where success was required.
    #[error("HTTP {status} from '{url}'")]
    Status {
        /// Status code returned by the server.
        status: u16,
        /// URL that was requested.
        url: String,
    },

    /// Configuration is invalid.
    ///
    /// ## Common Causes
    ///
    /// - Site label missing, empty, or containing a dot
    /// - Empty validator token
    /// - Concurrency settings of zero
    #[error("Configuration error: {0}")]
    Config(String),

    /// A base64 or UTF-8 payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// URL is malformed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The canonical TLD list was unusable.
    #[error("TLD list error: {0}")]
    TldList(String),

    /// A site could not be resolved by any layer.
    ///
    /// `position` is 1-based, matching the order of sites in the configuration.
    #[error("Failed to find domain #{position}")]
    Unresolved {
        /// 1-based position of the site in the configuration.
        position: usize,
    },

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for transient transport conditions (timeouts, refused
    /// connections, 5xx responses). Configuration problems and unresolved sites
    /// are permanent for the current input.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful for structured logging fields.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::Config(_) => "config",
            Self::Decode(_) => "decode",
            Self::Serialization(_) => "serialization",
            Self::InvalidUrl(_) => "invalid_url",
            Self::TldList(_) => "tld_list",
            Self::Unresolved { .. } => "unresolved",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn test_unresolved_message_names_position() {
        let err = Error::Unresolved { position: 3 };
        assert_eq!(err.to_string(), "Failed to find domain #3");
    }

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::Config("missing field".to_string()),
            Error::Decode("bad padding".to_string()),
            Error::InvalidUrl("not a url".to_string()),
            Error::TldList("empty".to_string()),
            Error::Other("unknown error".to_string()),
        ];

        for error in errors {
            let rendered = error.to_string();
            match &error {
                Error::Config(msg) => {
                    assert!(rendered.contains("Configuration error"));
                    assert!(rendered.contains(msg));
                },
                Error::Decode(msg) => {
                    assert!(rendered.contains("Decode error"));
                    assert!(rendered.contains(msg));
                },
                Error::InvalidUrl(msg) => {
                    assert!(rendered.contains("Invalid URL"));
                    assert!(rendered.contains(msg));
                },
                Error::TldList(msg) => {
                    assert!(rendered.contains("TLD list error"));
                    assert!(rendered.contains(msg));
                },
                Error::Other(msg) => assert_eq!(&rendered, msg),
                other => panic!("unexpected variant {other:?}"),
            }
        }
    }

    #[test]
    fn test_status_recoverability() {
        let server_err = Error::Status {
            status: 503,
            url: "https://example.com".to_string(),
        };
        let client_err = Error::Status {
            status: 404,
            url: "https://example.com".to_string(),
        };
        assert!(server_err.is_recoverable());
        assert!(!client_err.is_recoverable());
        assert!(!Error::Unresolved { position: 1 }.is_recoverable());
        assert!(!Error::Config("x".to_string()).is_recoverable());
    }

    #[test]
    fn test_categories() {
        assert_eq!(Error::Config(String::new()).category(), "config");
        assert_eq!(Error::TldList(String::new()).category(), "tld_list");
        assert_eq!(Error::Unresolved { position: 1 }.category(), "unresolved");
    }

    #[test]
    fn test_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Error::from(json_err).category(), "serialization");

        let b64_err = base64::engine::general_purpose::STANDARD
            .decode("!!!")
            .unwrap_err();
        assert_eq!(Error::from(b64_err).category(), "decode");

        let url_err = url::Url::parse("not a url").unwrap_err();
        assert_eq!(Error::from(url_err).category(), "invalid_url");
    }
}
