//! Cheap TLD shortlists that avoid an exhaustive sweep.
//!
//! Both extractors are best-effort: a transport failure yields an empty
//! candidate set and resolution moves on to the next layer.

use crate::http::{Fetch, Redirects};
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Fetch a trusted index page (redirects followed) and collect the suffixes
/// of every `<label>.<tld>` mention.
pub async fn extract_fast_path(fetch: &dyn Fetch, url: &str, label: &str) -> Vec<String> {
    match fetch.get(url, Redirects::Follow).await {
        Ok(response) => {
            let candidates = parse_fast_path(&response.body, label);
            debug!(url, label, found = candidates.len(), "fast path candidates");
            candidates
        },
        Err(err) => {
            debug!(url, error = %err, "fast path fetch failed");
            Vec::new()
        },
    }
}

/// Distinct uppercased suffixes of word-bounded `<label>.<alpha>` matches,
/// in first-seen order. The label is matched literally.
pub fn parse_fast_path(body: &str, label: &str) -> Vec<String> {
    let pattern = format!(r"\b{}\.([A-Za-z]+)", regex::escape(label));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            warn!(label, error = %err, "could not build fast path pattern");
            return Vec::new();
        },
    };

    let mut seen = HashSet::new();
    re.captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
        .filter(|tld| seen.insert(tld.clone()))
        .collect()
}

/// Query `<base>/<label>` (no redirects) and parse the newline list.
pub async fn extract_lookup(fetch: &dyn Fetch, base: &str, label: &str) -> Vec<String> {
    let url = lookup_url(base, label);
    match fetch.get(&url, Redirects::Deny).await {
        Ok(response) => {
            let candidates = parse_lookup(&response.body);
            debug!(url, found = candidates.len(), "lookup candidates");
            candidates
        },
        Err(err) => {
            debug!(url, error = %err, "lookup fetch failed");
            Vec::new()
        },
    }
}

/// One candidate per non-empty line; `io`, `.io` and `foo.io` all give `IO`.
pub fn parse_lookup(body: &str) -> Vec<String> {
    body.trim()
        .lines()
        .map(str::trim)
        .filter_map(|line| line.rsplit('.').next())
        .filter(|tld| !tld.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}

/// Lookup endpoint for a label.
pub fn lookup_url(base: &str, label: &str) -> String {
    format!("{}/{label}", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubFetch;

    #[test]
    fn test_parse_fast_path_distinct_uppercased() {
        let body = r#"
            <a href="https://foo.io/">foo.io</a>
            <a href="https://foo.COM">mirror</a>
            <a href="https://foo.io/about">again</a>
        "#;
        assert_eq!(parse_fast_path(body, "foo"), vec!["IO", "COM"]);
    }

    #[test]
    fn test_parse_fast_path_word_boundary() {
        let body = "barfoo.net myfoo.org foo.dev";
        assert_eq!(parse_fast_path(body, "foo"), vec!["DEV"]);
    }

    #[test]
    fn test_parse_fast_path_label_is_literal() {
        let body = "fxo.com f.o.net";
        assert!(parse_fast_path(body, "f.o").iter().all(|tld| tld == "NET"));
        assert!(parse_fast_path("no mentions here", "foo").is_empty());
    }

    #[test]
    fn test_parse_lookup_lines() {
        let body = "\nfoo.io\ncom\n  .dev  \n\n";
        assert_eq!(parse_lookup(body), vec!["IO", "COM", "DEV"]);
        assert!(parse_lookup("").is_empty());
    }

    #[test]
    fn test_lookup_url_trims_slash() {
        assert_eq!(
            lookup_url("https://lookup.example/", "foo"),
            "https://lookup.example/foo"
        );
        assert_eq!(
            lookup_url("https://lookup.example/api", "foo"),
            "https://lookup.example/api/foo"
        );
    }

    #[tokio::test]
    async fn test_extract_fast_path_follows_redirects() {
        let fetch = StubFetch::new().with_page("https://index.example", "visit foo.dev today");
        let tlds = extract_fast_path(&fetch, "https://index.example", "foo").await;
        assert_eq!(tlds, vec!["DEV"]);
        assert_eq!(
            fetch.redirects_for("https://index.example"),
            Some(Redirects::Follow)
        );
    }

    #[tokio::test]
    async fn test_extract_lookup_denies_redirects() {
        let fetch = StubFetch::new().with_page("https://lookup.example/foo", "foo.io\nfoo.dev");
        let tlds = extract_lookup(&fetch, "https://lookup.example", "foo").await;
        assert_eq!(tlds, vec!["IO", "DEV"]);
        assert_eq!(
            fetch.redirects_for("https://lookup.example/foo"),
            Some(Redirects::Deny)
        );
    }

    #[tokio::test]
    async fn test_extractors_fail_open() {
        let fetch = StubFetch::new();
        assert!(
            extract_fast_path(&fetch, "https://down.example", "foo")
                .await
                .is_empty()
        );
        assert!(
            extract_lookup(&fetch, "https://down.example", "foo")
                .await
                .is_empty()
        );
    }
}
