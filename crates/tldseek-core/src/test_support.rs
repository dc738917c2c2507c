//! In-memory transport for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::http::{Fetch, FetchResponse, Redirects};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Serves canned pages by exact URL and records every request.
///
/// Unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct StubFetch {
    routes: HashMap<String, FetchResponse>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<(String, Redirects)>>,
}

impl StubFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: &str) -> Self {
        self.with_status(url, 200, body)
    }

    pub fn with_status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            FetchResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested(&self, url: &str) -> bool {
        self.requests.lock().unwrap().iter().any(|(u, _)| u == url)
    }

    pub fn redirects_for(&self, url: &str) -> Option<Redirects> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, r)| *r)
    }
}

#[async_trait]
impl Fetch for StubFetch {
    async fn get(&self, url: &str, redirects: Redirects) -> Result<FetchResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), redirects));

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Other(format!("connection refused: {url}")))
    }
}

/// Answers every URL with an empty 404 after a fixed delay and records the
/// highest number of requests in flight at once.
pub struct GaugedFetch {
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    total: AtomicUsize,
}

impl GaugedFetch {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for GaugedFetch {
    async fn get(&self, _url: &str, _redirects: Redirects) -> Result<FetchResponse> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.total.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(FetchResponse {
            status: 404,
            body: String::new(),
        })
    }
}
