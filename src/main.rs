// src/main.rs
// =============================================================================
// This is the entry point of the crawler.
//
// What happens here:
// 1. Parse command-line arguments and set up logging
// 2. Start the engine (coordinator actor on the tokio runtime)
// 3. Send each seed URL to the coordinator as its own batch
// 4. Let the crawl run for a fixed amount of time, then halt everything
//
// There is no completion detection: the crawl is unbounded, so the clock is
// the only thing that ends it.
// =============================================================================

mod cli;
mod crawl;
mod logging;
mod pipeline;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use cli::{Cli, CrawlSettings};
use crawl::{CrawlContext, CrawlEvent, Engine, LinkBatch};
use pipeline::HttpFetcher;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match run(cli.settings()).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(settings: CrawlSettings) -> Result<()> {
    let fetcher = HttpFetcher::new(&settings.user_agent).context("failed to build HTTP client")?;
    let ctx = CrawlContext {
        fetcher: Arc::new(fetcher),
        normalization: settings.normalization,
    };

    let engine = if settings.emit_batches {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(print_batches(rx));
        Engine::spawn_observed(ctx, tx)
    } else {
        Engine::spawn(ctx)
    };

    info!(
        seeds = settings.seeds.len(),
        run_for_secs = settings.run_for.as_secs(),
        "crawl started"
    );

    for seed in settings.seeds {
        engine.send(LinkBatch::seed(vec![seed]))?;
    }

    tokio::time::sleep(settings.run_for).await;

    if let Ok(count) = engine.worker_count().await {
        debug!(tasks = count.tasks, registered = count.registered, "halting live workers");
    }
    engine.shutdown().await;

    Ok(())
}

// Writes each received batch to stdout as one JSON line
async fn print_batches(mut events: mpsc::UnboundedReceiver<CrawlEvent>) {
    while let Some(event) = events.recv().await {
        if let Some(line) = batch_line(&event) {
            println!("{}", line);
        }
    }
}

// The JSON line for a received batch; every other event prints nothing
fn batch_line(event: &CrawlEvent) -> Option<String> {
    if !matches!(event, CrawlEvent::BatchReceived { .. }) {
        return None;
    }

    match serde_json::to_string(event) {
        Ok(line) => Some(line),
        Err(e) => {
            error!(err = %e, "failed to serialize batch");
            None
        }
    }
}
