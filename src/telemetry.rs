//! Tracing subscriber setup for applications embedding the crate.

use tracing_subscriber::EnvFilter;

use crate::config::StatsConfig;

/// Installs a global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `info`. With `json`
/// set, events are written as JSON lines. Returns `false` if a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_tracing(json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    if installed {
        tracing::debug!(json, "tracing initialized");
    }
    installed
}

/// Installs the subscriber selected by [`StatsConfig::log_json`].
///
/// Same return value as [`init_tracing`].
pub fn init_from_config(config: &StatsConfig) -> bool {
    init_tracing(config.log_json)
}
