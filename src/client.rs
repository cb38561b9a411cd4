//! Explicitly initialized handle tying the layers together.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::StatsConfig;
use crate::domain::{EventBus, LocationCode, Stats, StatsEvent};
use crate::error::StatsError;
use crate::format::MagnitudeFormatter;
use crate::persistence::{SnapshotCache, load_global_data, load_snapshot_data};
use crate::service::{HttpSnapshotSource, SnapshotStore, StatsService};

/// Entry point for presentation code.
///
/// Built once by [`StatsClient::initialize`]; cheap to clone.
#[derive(Debug, Clone)]
pub struct StatsClient {
    service: Arc<StatsService<HttpSnapshotSource>>,
    event_bus: EventBus,
    formatter: MagnitudeFormatter,
}

impl StatsClient {
    /// Loads the bundled data and wires source, cache, store and service.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Config`] if the bundle cannot be read or the
    /// base URL is unusable, and decode or version errors for a malformed
    /// bundle or batch file.
    pub async fn initialize(config: &StatsConfig) -> Result<Self, StatsError> {
        let global = load_global_data(&config.bundle_path).await?;
        let source = HttpSnapshotSource::new(config.base_url.clone())?;
        let cache = config
            .cache_enabled
            .then(|| SnapshotCache::new(&config.cache_dir));

        let store = Arc::new(SnapshotStore::new(global, source, cache));
        if let Some(path) = &config.snapshot_batch_path {
            let batch = load_snapshot_data(path).await?;
            store.load_batch(batch).await;
        }

        let event_bus = EventBus::new(config.event_bus_capacity);
        let service = Arc::new(StatsService::new(store, event_bus.clone()));

        tracing::info!(
            base_url = %config.base_url,
            locations = service.store().location_count(),
            cache = config.cache_enabled,
            "stats client initialized"
        );

        Ok(Self {
            service,
            event_bus,
            formatter: MagnitudeFormatter::new(config.locale.clone()),
        })
    }

    /// Returns the stats service.
    #[must_use]
    pub fn service(&self) -> &Arc<StatsService<HttpSnapshotSource>> {
        &self.service
    }

    /// Returns the formatter for the configured locale.
    #[must_use]
    pub fn formatter(&self) -> &MagnitudeFormatter {
        &self.formatter
    }

    /// Subscribes to refresh events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StatsEvent> {
        self.event_bus.subscribe()
    }

    /// Fetches and derives fresh stats for `code`.
    ///
    /// # Errors
    ///
    /// See [`StatsService::refresh`].
    pub async fn refresh(&self, code: &LocationCode) -> Result<Stats, StatsError> {
        self.service.refresh(code).await
    }
}
