//! Logging setup for the pillbox binary.
//!
//! The library only emits `tracing` events; subscribers are installed here.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the default subscriber at WARN
///
/// Per-event detail (restocks, dose changes, the projected span) is logged
/// at debug and info, so a plain run shows only the ledger.
pub fn init() {
    init_with_level("warn")
}

/// Install a compact stderr subscriber filtered at `default_level`
///
/// RUST_LOG takes precedence when set. Stdout is left to the rendered
/// ledger, JSON or export summary.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route normalize/fold debug output through the test harness
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
