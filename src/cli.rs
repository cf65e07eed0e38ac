// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Everything the crawl can be configured with comes in through here and is
// bundled into a `CrawlSettings` value for main.rs.
// =============================================================================

use clap::Parser;
use std::time::Duration;

use crate::pipeline::{LinkNormalization, DEFAULT_USER_AGENT};

// Seeds used when none are given on the command line
const DEFAULT_SEEDS: [&str; 2] = ["https://levenue.com", "https://fulltimegodev.com"];

#[derive(Parser, Debug)]
#[command(
    name = "link-swarm",
    version,
    about = "A concurrent web crawler: one worker per discovered link",
    long_about = "link-swarm fetches each seed URL, extracts every <a href>, and spawns a new \
                  worker for every link it finds, recursively and without limit. \
                  It stops after a fixed amount of time."
)]
pub struct Cli {
    /// Seed URLs; each one is sent to the coordinator as its own batch
    ///
    /// Example: link-swarm https://example.com https://rust-lang.org
    #[arg(default_values = DEFAULT_SEEDS)]
    pub seeds: Vec<String>,

    /// How long to crawl before halting every worker, in seconds
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub run_for: u64,

    /// How relative links are made absolute
    #[arg(long, value_enum, default_value_t = LinkNormalization::Resolve)]
    pub normalize: LinkNormalization,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Print every batch the coordinator receives as a JSON line on stdout
    #[arg(long)]
    pub emit_batches: bool,

    /// Log at debug level (RUST_LOG takes precedence when set)
    #[arg(short, long)]
    pub verbose: bool,
}

// Resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    pub seeds: Vec<String>,
    pub run_for: Duration,
    pub normalization: LinkNormalization,
    pub user_agent: String,
    pub emit_batches: bool,
}

impl Cli {
    pub fn settings(&self) -> CrawlSettings {
        CrawlSettings {
            seeds: self.seeds.clone(),
            run_for: Duration::from_secs(self.run_for),
            normalization: self.normalize,
            user_agent: self.user_agent.clone(),
            emit_batches: self.emit_batches,
        }
    }
}
