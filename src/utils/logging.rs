//! Logging initialization
//!
//! Sets up the tracing subscriber for the monitor binary. The filter honors
//! `RUST_LOG` and falls back to `info` for this crate.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// When `json` is true, log records are emitted as structured JSON, which is
/// what log collectors expect in deployment; otherwise human-readable output.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,provider_watch=info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .init();
    }
}
