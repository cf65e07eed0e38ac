// src/crawl/coordinator.rs
// =============================================================================
// The coordinator turns "a batch of links" into "one worker per link".
//
// It is a single task draining its own mailbox, one message at a time. That
// makes it the only writer of the worker registry, so the registry needs no
// lock.
//
// There is no cap and no stop condition. Every batch, including the ones the
// crawler's own workers report, spawns new workers until someone calls
// shutdown.
// =============================================================================

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, trace};

use super::engine::CrawlContext;
use super::message::{
    CoordinatorHandle, CoordinatorMsg, CrawlEvent, LinkBatch, Lifecycle, WorkerCount,
};
use super::worker::Worker;

// Registry entry for one running worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WorkerHandle {
    pub id: u64,
    pub url: String,
}

pub struct Coordinator {
    ctx: Arc<CrawlContext>,
    address: CoordinatorHandle,
    observer: Option<mpsc::UnboundedSender<CrawlEvent>>,
    // Keyed by "visitor/<url>"; a respawn of the same URL replaces the entry
    registry: HashMap<String, WorkerHandle>,
    // Each task yields (worker id, registry key) when it finishes
    workers: JoinSet<(u64, String)>,
    next_id: u64,
}

impl Coordinator {
    pub fn new(
        ctx: Arc<CrawlContext>,
        address: CoordinatorHandle,
        observer: Option<mpsc::UnboundedSender<CrawlEvent>>,
    ) -> Self {
        Self {
            ctx,
            address,
            observer,
            registry: HashMap::new(),
            workers: JoinSet::new(),
            next_id: 0,
        }
    }

    // Message loop; returns after a Shutdown message has been handled
    pub(crate) async fn run(mut self, mut mailbox: mpsc::UnboundedReceiver<CoordinatorMsg>) {
        self.on_lifecycle(Lifecycle::Started);

        while let Some(msg) = mailbox.recv().await {
            self.reap_finished();

            match msg {
                CoordinatorMsg::Visit(batch) => self.handle_visit_request(batch),
                CoordinatorMsg::CountWorkers(reply) => {
                    let _ = reply.send(self.worker_count());
                }
                CoordinatorMsg::Shutdown(ack) => {
                    self.stop_workers().await;
                    self.on_lifecycle(Lifecycle::Stopped);
                    let _ = ack.send(());
                    return;
                }
            }
        }

        // Unreachable while we hold our own address, but stay tidy anyway
        self.stop_workers().await;
        self.on_lifecycle(Lifecycle::Stopped);
    }

    fn on_lifecycle(&self, msg: Lifecycle) {
        match msg {
            Lifecycle::Started => info!("manager has started"),
            Lifecycle::Stopped => debug!("manager has stopped"),
        }
    }

    // Spawns one worker per link, in batch order
    fn handle_visit_request(&mut self, batch: LinkBatch) {
        debug!(source = ?batch.source, links = batch.len(), "batch received");
        self.publish(CrawlEvent::BatchReceived {
            source: batch.source.clone(),
            links: batch.links.clone(),
        });

        for link in batch.links {
            info!(url = %link, "visiting url");
            self.spawn_worker(link);
        }
    }

    fn spawn_worker(&mut self, url: String) {
        let id = self.next_id;
        self.next_id += 1;

        let key = format!("visitor/{}", url);
        let worker = Worker::new(id, url.clone(), self.address.clone(), Arc::clone(&self.ctx));

        let task_key = key.clone();
        self.workers.spawn(async move {
            worker.run().await;
            (id, task_key)
        });

        let handle = WorkerHandle {
            id,
            url: url.clone(),
        };
        if let Some(previous) = self.registry.insert(key.clone(), handle) {
            debug!(key = %key, previous = previous.id, current = id, "registry entry replaced");
        }

        self.publish(CrawlEvent::WorkerSpawned { key, url });
    }

    // Collects finished workers and drops their registry entries
    fn reap_finished(&mut self) {
        while let Some(result) = self.workers.try_join_next() {
            match result {
                Ok((id, key)) => {
                    // Only remove the entry if a newer worker hasn't taken the key
                    if self.registry.get(&key).map(|h| h.id) == Some(id) {
                        self.registry.remove(&key);
                    }
                }
                Err(e) if e.is_panic() => error!(err = %e, "worker panicked"),
                Err(_) => {}
            }
        }
    }

    fn worker_count(&self) -> WorkerCount {
        WorkerCount {
            tasks: self.workers.len(),
            registered: self.registry.len(),
        }
    }

    async fn stop_workers(&mut self) {
        let count = self.worker_count();
        debug!(tasks = count.tasks, registered = count.registered, "aborting workers");
        for handle in self.registry.values() {
            trace!(worker = handle.id, url = %handle.url, "aborting worker");
        }

        self.workers.shutdown().await;
        self.registry.clear();
    }

    fn publish(&self, event: CrawlEvent) {
        if let Some(observer) = &self.observer {
            // Observer hung up; the crawl carries on without it
            let _ = observer.send(event);
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a JoinSet?
//    - A collection of spawned tokio tasks that we own
//    - try_join_next() hands back finished tasks without waiting
//    - shutdown() aborts everything still running and waits for it
//
// 2. Why `&mut self` everywhere but no Mutex?
//    - Only the coordinator's own task ever touches the registry
//    - Workers talk to it by sending messages, never by sharing memory
//
// 3. Why keep our own address (CoordinatorHandle)?
//    - Each worker needs somewhere to send its links
//    - Cloning an mpsc sender is cheap; all clones feed the same mailbox
// -----------------------------------------------------------------------------
