//! `keygate-observability` — process-wide logging setup.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber: JSON lines, `RUST_LOG`-style
/// filtering, `info` by default.
///
/// Idempotent — a second call (e.g. from a test harness that spawns several
/// servers in one process) is a no-op rather than a panic.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init();
}
