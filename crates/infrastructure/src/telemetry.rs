//! Telemetry initialization
//!
//! Installs a tracing subscriber with env-filter support; `RUST_LOG`
//! overrides the default `info` level.

use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Initialize the global tracing subscriber
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_telemetry(config: &TelemetryConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    // a subscriber set by the test harness or an embedding binary wins
    drop(result);
}
