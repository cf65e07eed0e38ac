// src/crawl/engine.rs
// =============================================================================
// The engine hosts the coordinator on the tokio runtime.
//
// Usage:
//   let engine = Engine::spawn(ctx);
//   engine.send(LinkBatch::seed(vec![...]));
//   tokio::time::sleep(run_for).await;
//   engine.shutdown().await;
//
// There is no "crawl finished" signal. Callers decide when to stop.
// =============================================================================

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, warn};

use super::coordinator::Coordinator;
use super::message::{
    CoordinatorHandle, CoordinatorMsg, CoordinatorStopped, CrawlEvent, LinkBatch, WorkerCount,
};
use crate::pipeline::{Fetcher, LinkNormalization};

// Everything a worker needs besides its URL
pub struct CrawlContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub normalization: LinkNormalization,
}

pub struct Engine {
    coordinator: CoordinatorHandle,
    task: JoinHandle<()>,
}

impl Engine {
    /// Starts a coordinator with no observer
    pub fn spawn(ctx: CrawlContext) -> Self {
        Self::start(ctx, None)
    }

    /// Starts a coordinator that publishes every batch and spawn to `observer`
    pub fn spawn_observed(ctx: CrawlContext, observer: mpsc::UnboundedSender<CrawlEvent>) -> Self {
        Self::start(ctx, Some(observer))
    }

    fn start(ctx: CrawlContext, observer: Option<mpsc::UnboundedSender<CrawlEvent>>) -> Self {
        let (tx, mailbox) = mpsc::unbounded_channel();
        let coordinator = CoordinatorHandle::new(tx);

        let actor = Coordinator::new(Arc::new(ctx), coordinator.clone(), observer);
        let task = tokio::spawn(actor.run(mailbox));

        Self { coordinator, task }
    }

    pub fn send(&self, batch: LinkBatch) -> Result<(), CoordinatorStopped> {
        self.coordinator.send(batch)
    }

    /// Asks the coordinator how many workers are still alive
    pub async fn worker_count(&self) -> Result<WorkerCount, CoordinatorStopped> {
        let (reply, rx) = oneshot::channel();
        self.coordinator.post(CoordinatorMsg::CountWorkers(reply))?;
        rx.await.map_err(|_| CoordinatorStopped)
    }

    // Aborts every worker and waits for the coordinator to exit
    //
    // In-flight fetches are dropped mid-request; nothing is flushed.
    pub async fn shutdown(self) {
        let (ack, done) = oneshot::channel();
        if self.coordinator.post(CoordinatorMsg::Shutdown(ack)).is_ok() && done.await.is_err() {
            warn!("coordinator exited before acknowledging shutdown");
        }

        if let Err(e) = self.task.await {
            error!(err = %e, "coordinator task failed");
        }
    }
}
