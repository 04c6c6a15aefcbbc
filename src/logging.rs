//! Logging setup
//!
//! Library code logs through `tracing`; binaries call [`init_logging`] once
//! to print those events. `RUST_LOG` overrides the default filter, e.g.
//! `RUST_LOG=scan_bench_charts=debug` shows layout decisions.

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a fmt subscriber at `info` for this crate.
pub fn init_logging() {
    init_logging_with_level("info")
}

/// Install a fmt subscriber at the given level ("trace" .. "error").
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), level).into());

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .try_init();
}
