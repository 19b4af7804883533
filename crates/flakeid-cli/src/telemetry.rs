//! Structured logging for the `flakeid` binary.
//!
//! Events go to **stderr** so stdout carries nothing but IDs. Filtering comes
//! from `RUST_LOG` and defaults to `info`; the generator's per-call spans are
//! at `trace`.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing-subscriber` fmt subscriber.
pub fn init_tracing() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_timer(fmt::time::ChronoLocal::rfc_3339())
        .init();
}
