//! Installs a `tracing` subscriber for binaries and tests using this crate.
//!
//! The library itself only emits events: `warn` for no-op queue operations and rejected
//! mutations, `error`/`warn` when an engine finds no solution, `info` when a spanning tree is
//! complete and `debug`/`trace` for individual mutations and relaxations.

use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::TryInitError};

/// Installs a compact stderr subscriber with the given default filter, e.g. `"stepgraphs=debug"`.
/// A filter in `RUST_LOG` takes precedence.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_logging(filter: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()
}
