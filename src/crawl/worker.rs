// src/crawl/worker.rs
// =============================================================================
// A worker owns exactly one URL.
//
// Lifecycle:
//   Created -> Started -> (fetch -> extract -> report) -> Stopped -> gone
//
// On success it reports the discovered links back to the coordinator. On
// failure it logs the error and reports nothing. It never retries, and its
// failure never touches any other worker.
// =============================================================================

use std::sync::Arc;
use tracing::{debug, error, info};

use super::engine::CrawlContext;
use super::message::{CoordinatorHandle, LinkBatch, Lifecycle};
use crate::pipeline;

pub struct Worker {
    id: u64,
    url: String,
    coordinator: CoordinatorHandle,
    ctx: Arc<CrawlContext>,
}

impl Worker {
    pub fn new(
        id: u64,
        url: String,
        coordinator: CoordinatorHandle,
        ctx: Arc<CrawlContext>,
    ) -> Self {
        Self {
            id,
            url,
            coordinator,
            ctx,
        }
    }

    // Drives the worker through its whole life, then returns
    pub async fn run(self) {
        self.receive(Lifecycle::Started).await;
        self.receive(Lifecycle::Stopped).await;
    }

    async fn receive(&self, msg: Lifecycle) {
        match msg {
            Lifecycle::Started => self.on_started().await,
            // Nothing to clean up yet
            Lifecycle::Stopped => {}
        }
    }

    async fn on_started(&self) {
        info!(worker = self.id, url = %self.url, "visitor has started");

        let fetcher = self.ctx.fetcher.as_ref();
        let links = match pipeline::visit(fetcher, &self.url, self.ctx.normalization).await {
            Ok(links) => links,
            Err(e) => {
                error!(worker = self.id, url = %e.url(), err = %e, "visit error");
                return;
            }
        };

        debug!(worker = self.id, url = %self.url, found = links.len(), "visit complete");

        if self
            .coordinator
            .send(LinkBatch::discovered(self.url.clone(), links))
            .is_err()
        {
            debug!(worker = self.id, url = %self.url, "coordinator gone, dropping batch");
        }
    }
}
