// src/logging.rs
// =============================================================================
// Log setup. Everything goes to stderr so --emit-batches output on stdout
// stays machine-readable.
//
// RUST_LOG wins when it is set (e.g. RUST_LOG=link_swarm=trace). Otherwise
// we log at info, or debug with --verbose.
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
