// src/crawl/message.rs
// =============================================================================
// Everything that travels between the coordinator and its workers.
//
// Message flow:
//   caller  --LinkBatch-->  coordinator  --spawn-->  worker (one per link)
//   worker  --LinkBatch-->  coordinator  --spawn-->  ...and so on
//
// The coordinator's mailbox is an unbounded tokio mpsc channel. Sending never
// waits, so there is no backpressure anywhere in the crawl.
// =============================================================================

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

// An ordered list of links handed to the coordinator
//
// `source` is the page the links were found on, or None for seed input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LinkBatch {
    pub source: Option<String>,
    pub links: Vec<String>,
}

impl LinkBatch {
    /// A batch of seed URLs supplied from outside the crawl
    pub fn seed(links: Vec<String>) -> Self {
        Self { source: None, links }
    }

    /// A batch a worker discovered on `source`
    pub fn discovered(source: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            source: Some(source.into()),
            links,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

// Lifecycle notifications every actor receives exactly once each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Started,
    Stopped,
}

// Live worker bookkeeping, as seen by the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerCount {
    /// Worker tasks that have not finished yet
    pub tasks: usize,
    /// Distinct registry keys (one per URL) held by those tasks
    pub registered: usize,
}

// What the coordinator's mailbox accepts
#[derive(Debug)]
pub(crate) enum CoordinatorMsg {
    Visit(LinkBatch),
    CountWorkers(oneshot::Sender<WorkerCount>),
    Shutdown(oneshot::Sender<()>),
}

// Notifications published to an optional observer
//
// Failed visits are never published; they only show up in the logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CrawlEvent {
    /// The coordinator accepted a batch (seed or discovered)
    BatchReceived {
        source: Option<String>,
        links: Vec<String>,
    },
    /// The coordinator started a worker for one link
    WorkerSpawned { key: String, url: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("coordinator has stopped")]
pub struct CoordinatorStopped;

// Address of the coordinator; cheap to clone, one copy per worker
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::UnboundedSender<CoordinatorMsg>,
}

impl CoordinatorHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<CoordinatorMsg>) -> Self {
        Self { tx }
    }

    // Fire-and-forget: hand a batch to the coordinator
    pub fn send(&self, batch: LinkBatch) -> Result<(), CoordinatorStopped> {
        self.tx
            .send(CoordinatorMsg::Visit(batch))
            .map_err(|_| CoordinatorStopped)
    }

    pub(crate) fn post(&self, msg: CoordinatorMsg) -> Result<(), CoordinatorStopped> {
        self.tx.send(msg).map_err(|_| CoordinatorStopped)
    }
}
