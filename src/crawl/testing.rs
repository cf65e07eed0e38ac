// src/crawl/testing.rs
// =============================================================================
// Test doubles shared by the crawl and pipeline tests.
// =============================================================================

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

use super::message::CrawlEvent;
use crate::pipeline::{FetchError, Fetcher};

// Serves canned pages from memory; anything else is a 404
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    // Keys go through Url::parse so "http://a.test" and "http://a.test/" match
    pub fn page(mut self, url: &str, html: &str) -> Self {
        let key = Url::parse(url).expect("test page URL must parse").to_string();
        self.pages.insert(key, html.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url.as_str())
            .map(|html| html.as_bytes().to_vec())
            .ok_or(FetchError::Status(404))
    }
}

// Never answers; keeps workers alive until they are aborted
pub struct PendingFetcher;

#[async_trait]
impl Fetcher for PendingFetcher {
    async fn fetch(&self, _url: &Url) -> Result<Vec<u8>, FetchError> {
        std::future::pending().await
    }
}

// Waits for the batch reported by the worker that visited `source`
pub async fn next_batch_from(
    events: &mut mpsc::UnboundedReceiver<CrawlEvent>,
    source: &str,
) -> Vec<String> {
    let wait = async {
        loop {
            match events.recv().await {
                Some(CrawlEvent::BatchReceived {
                    source: Some(from),
                    links,
                }) if from == source => return links,
                Some(_) => continue,
                None => panic!("event stream closed before {} reported", source),
            }
        }
    };

    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .unwrap_or_else(|_| panic!("no batch from {} within 5s", source))
}
