// src/crawl/mod.rs
// =============================================================================
// This module handles crawl orchestration.
//
// Actors:
// - Coordinator: receives link batches and spawns one worker per link
// - Worker: visits one URL, reports what it found, then exits
// - Engine: hosts the coordinator and stops everything on shutdown
//
// Deliberately missing: depth limits, a crawl-wide visited set, rate
// limiting, robots.txt and completion detection. A crawl runs until the
// caller shuts the engine down.
// =============================================================================

mod coordinator;
mod engine;
mod message;
mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{CrawlContext, Engine};
pub use message::{CrawlEvent, LinkBatch};
