//! Client configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`), each with a default that matches the public data feed.

use std::path::PathBuf;

use reqwest::Url;

use crate::error::StatsError;
use crate::format::NumberLocale;

const DEFAULT_BASE_URL: &str = "https://tirania.org/covid-data/";

/// Top-level configuration.
///
/// Loaded once at startup via [`StatsConfig::from_env`].
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Base URL per-code snapshots are fetched from (`<base><code>`).
    pub base_url: Url,

    /// Path of the bundled location table.
    pub bundle_path: PathBuf,

    /// Optional multi-location snapshot file loaded at initialization.
    pub snapshot_batch_path: Option<PathBuf>,

    /// Directory of the on-disk snapshot cache.
    pub cache_dir: PathBuf,

    /// Master switch for the snapshot cache.
    pub cache_enabled: bool,

    /// Capacity of the refresh event broadcast channel.
    pub event_bus_capacity: usize,

    /// Separators used by the number formatter.
    pub locale: NumberLocale,

    /// Emit logs as JSON instead of human-readable lines.
    ///
    /// Read by [`crate::telemetry::init_from_config`]; the crate never
    /// installs a subscriber on its own.
    pub log_json: bool,
}

impl StatsConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Config`] if `COVID_DATA_BASE_URL` is set but is
    /// not a valid URL.
    pub fn from_env() -> Result<Self, StatsError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Missing or unparsable values fall back to their defaults, except
    /// the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Config`] for an invalid base URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StatsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url =
            lookup("COVID_DATA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url).map_err(|e| {
            StatsError::Config(format!("invalid COVID_DATA_BASE_URL {raw_url:?}: {e}"))
        })?;

        let bundle_path =
            lookup("COVID_BUNDLE_PATH").map_or_else(|| PathBuf::from("global"), PathBuf::from);
        let snapshot_batch_path = lookup("COVID_SNAPSHOT_BATCH_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let cache_dir = lookup("COVID_CACHE_DIR").map_or_else(default_cache_dir, PathBuf::from);
        let cache_enabled = parse_bool(lookup("COVID_CACHE_ENABLED"), true);
        let event_bus_capacity = parse_or(lookup("COVID_EVENT_BUS_CAPACITY"), 64);

        let defaults = NumberLocale::default();
        let locale = NumberLocale::new(
            lookup("COVID_GROUP_SEPARATOR").unwrap_or(defaults.group_separator),
            lookup("COVID_DECIMAL_SEPARATOR")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.decimal_separator),
        );
        let log_json = parse_bool(lookup("COVID_LOG_JSON"), false);

        Ok(Self {
            base_url,
            bundle_path,
            snapshot_batch_path,
            cache_dir,
            cache_enabled,
            event_bus_capacity,
            locale,
            log_json,
        })
    }
}

/// Platform cache directory, or the temp directory when there is none.
fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("covid-stats")
}

/// Parses `value` as `T`, returning `default` on missing or invalid input.
fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Accepts `true`/`1`/`false`/`0` in any case; anything else is `default`.
fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
