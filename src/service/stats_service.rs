//! Stats service: derivation, refresh and fan-out.
//!
//! [`StatsService`] turns store lookups into [`Stats`], remembers the last
//! successfully derived stats per location, and publishes every refresh
//! outcome through the [`EventBus`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::source::SnapshotSource;
use super::store::SnapshotStore;
use crate::domain::{EventBus, LocationCode, Stats, StatsEvent, build_stats};
use crate::error::StatsError;

/// Business logic over a [`SnapshotStore`].
#[derive(Debug)]
pub struct StatsService<S> {
    store: Arc<SnapshotStore<S>>,
    event_bus: EventBus,
    latest: RwLock<HashMap<LocationCode, Stats>>,
}

impl<S: SnapshotSource + 'static> StatsService<S> {
    /// Creates a new `StatsService`.
    #[must_use]
    pub fn new(store: Arc<SnapshotStore<S>>, event_bus: EventBus) -> Self {
        Self {
            store,
            event_bus,
            latest: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<SnapshotStore<S>> {
        &self.store
    }

    /// Derives stats for `code` from whatever snapshot is currently loaded.
    ///
    /// The stats are stamped with the snapshot's own time. Nothing is
    /// fetched.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::MissingLocation`] or
    /// [`StatsError::MissingSnapshot`] if either lookup fails, and
    /// [`StatsError::InsufficientData`] if a series is too short.
    pub async fn stats_for(&self, code: &LocationCode) -> Result<Stats, StatsError> {
        let location = self
            .store
            .resolve_location(code)
            .ok_or_else(|| StatsError::MissingLocation(code.clone()))?;
        let snapshot = self
            .store
            .resolve_snapshot(code)
            .await
            .ok_or_else(|| StatsError::MissingSnapshot(code.clone()))?;
        build_stats(location, &snapshot.snapshot, snapshot.time)
    }

    /// Fetches a fresh snapshot for `code`, derives stats from it and
    /// publishes them.
    ///
    /// On failure the previously published stats stay current and a
    /// [`StatsEvent::RefreshFailed`] is published.
    ///
    /// # Errors
    ///
    /// Returns the lookup, fetch or derivation error.
    pub async fn refresh(&self, code: &LocationCode) -> Result<Stats, StatsError> {
        match self.try_refresh(code).await {
            Ok(stats) => {
                self.latest
                    .write()
                    .await
                    .insert(code.clone(), stats.clone());
                let _ = self.event_bus.publish(StatsEvent::Updated {
                    code: code.clone(),
                    stats: Box::new(stats.clone()),
                });
                tracing::info!(%code, total_cases = stats.total_cases, "stats refreshed");
                Ok(stats)
            }
            Err(err) => {
                tracing::warn!(%code, error = %err, "stats refresh failed");
                let _ = self.event_bus.publish(StatsEvent::RefreshFailed {
                    code: code.clone(),
                    reason: err.to_string(),
                    timestamp: Utc::now(),
                });
                Err(err)
            }
        }
    }

    async fn try_refresh(&self, code: &LocationCode) -> Result<Stats, StatsError> {
        let location = self
            .store
            .resolve_location(code)
            .ok_or_else(|| StatsError::MissingLocation(code.clone()))?;
        let snapshot = self.store.fetch(code).await?;
        build_stats(location, &snapshot.snapshot, snapshot.time)
    }

    /// Starts a refresh of `code` in the background.
    ///
    /// The outcome reaches subscribers through the event bus; the handle
    /// can be awaited or dropped.
    pub fn spawn_refresh(
        self: &Arc<Self>,
        code: LocationCode,
    ) -> JoinHandle<Result<Stats, StatsError>> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.refresh(&code).await })
    }

    /// Returns the last successfully refreshed stats of `code`.
    pub async fn latest(&self, code: &LocationCode) -> Option<Stats> {
        self.latest.read().await.get(code).cloned()
    }

    /// Explicit fallback mode: derives stats like [`Self::stats_for`] but
    /// substitutes [`Stats::placeholder`], captioned with the code, on
    /// failure.
    pub async fn stats_or_placeholder(&self, code: &LocationCode) -> Stats {
        match self.stats_for(code).await {
            Ok(stats) => stats,
            Err(err) => {
                tracing::warn!(%code, error = %err, "serving placeholder stats");
                Stats::placeholder(code.to_string())
            }
        }
    }
}
