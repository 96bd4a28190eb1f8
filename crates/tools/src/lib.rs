//! Developer tooling over the level engine: config files, invariant checks and reports.

pub mod config_file;
pub mod invariants;
pub mod report;

use std::io;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the fmt subscriber; `RUST_LOG` wins over the verbosity default.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}
