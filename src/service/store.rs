//! Snapshot store: location table, snapshot table, cache and source.
//!
//! [`SnapshotStore`] answers the two lookups the stats builder needs,
//! [`SnapshotStore::resolve_location`] and
//! [`SnapshotStore::resolve_snapshot`], and refreshes the snapshot table
//! from its [`SnapshotSource`].

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::source::SnapshotSource;
use crate::domain::{GlobalData, IndividualSnapshot, LocationCode, SnapshotData, TrackedLocation};
use crate::error::StatsError;
use crate::persistence::SnapshotCache;

/// Owner of all loaded location metadata and snapshots.
///
/// The location table is immutable after construction. Each entry of the
/// snapshot table is replaced wholesale whenever a newer snapshot arrives.
#[derive(Debug)]
pub struct SnapshotStore<S> {
    locations: HashMap<LocationCode, TrackedLocation>,
    snapshots: RwLock<HashMap<LocationCode, IndividualSnapshot>>,
    cache: Option<SnapshotCache>,
    source: S,
}

impl<S: SnapshotSource> SnapshotStore<S> {
    /// Creates a store from a loaded location table.
    #[must_use]
    pub fn new(global: GlobalData, source: S, cache: Option<SnapshotCache>) -> Self {
        Self {
            locations: global.globals,
            snapshots: RwLock::new(HashMap::new()),
            cache,
            source,
        }
    }

    /// Returns the metadata of `code`, if tracked.
    #[must_use]
    pub fn resolve_location(&self, code: &LocationCode) -> Option<&TrackedLocation> {
        self.locations.get(code)
    }

    /// Returns the current snapshot of `code`, if one has been loaded.
    pub async fn resolve_snapshot(&self, code: &LocationCode) -> Option<IndividualSnapshot> {
        self.snapshots.read().await.get(code).cloned()
    }

    /// Returns every tracked location code, sorted.
    #[must_use]
    pub fn location_codes(&self) -> Vec<LocationCode> {
        let mut codes: Vec<LocationCode> = self.locations.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Number of tracked locations.
    #[must_use]
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Replaces the snapshot of `code`.
    pub async fn insert(&self, code: LocationCode, snapshot: IndividualSnapshot) {
        self.snapshots.write().await.insert(code, snapshot);
    }

    /// Loads every snapshot of a batch file, stamping each with the
    /// batch's time and version. Returns the number of entries loaded.
    pub async fn load_batch(&self, batch: SnapshotData) -> usize {
        let SnapshotData {
            time,
            version,
            snapshots,
        } = batch;
        let mut table = self.snapshots.write().await;
        let count = snapshots.len();
        for (code, snapshot) in snapshots {
            table.insert(
                code,
                IndividualSnapshot {
                    time,
                    version,
                    snapshot,
                },
            );
        }
        tracing::info!(count, "snapshot batch installed");
        count
    }

    /// Fetches a fresh snapshot of `code` and installs it.
    ///
    /// On success the snapshot is also written to the cache; a cache write
    /// failure is logged and otherwise ignored. When the fetch fails and a
    /// cached copy exists, the cached copy is installed and returned
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when there is no cached copy to fall back to.
    pub async fn fetch(&self, code: &LocationCode) -> Result<IndividualSnapshot, StatsError> {
        match self.source.fetch(code).await {
            Ok(snapshot) => {
                if let Some(cache) = &self.cache
                    && let Err(e) = cache.store(code, &snapshot).await
                {
                    tracing::warn!(%code, error = %e, "failed to cache snapshot");
                }
                self.insert(code.clone(), snapshot.clone()).await;
                Ok(snapshot)
            }
            Err(err) => {
                tracing::warn!(%code, error = %err, "snapshot fetch failed");
                match self.load_cached(code).await {
                    Some(cached) => {
                        tracing::info!(%code, time = %cached.time, "serving cached snapshot");
                        self.insert(code.clone(), cached.clone()).await;
                        Ok(cached)
                    }
                    None => Err(err),
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn source_for_tests(&self) -> &S {
        &self.source
    }

    async fn load_cached(&self, code: &LocationCode) -> Option<IndividualSnapshot> {
        let cache = self.cache.as_ref()?;
        match cache.load(code).await {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!(%code, error = %e, "cache unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use chrono::Utc;

    use crate::domain::{
        FORMAT_VERSION, GlobalData, IndividualSnapshot, LocationCode, Snapshot, TrackedLocation,
    };
    use crate::error::StatsError;
    use crate::service::SnapshotSource;

    /// In-memory source whose responses can be swapped and failed on demand.
    #[derive(Debug, Default)]
    pub(crate) struct FakeSource {
        pub(crate) responses: Mutex<HashMap<LocationCode, IndividualSnapshot>>,
        pub(crate) failing: AtomicBool,
        pub(crate) calls: AtomicUsize,
    }

    impl FakeSource {
        pub(crate) fn with(code: &str, deaths: Vec<i64>, confirmed: Vec<i64>) -> Self {
            let source = Self::default();
            source.set(code, deaths, confirmed);
            source
        }

        pub(crate) fn set(&self, code: &str, deaths: Vec<i64>, confirmed: Vec<i64>) {
            if let Ok(mut map) = self.responses.lock() {
                map.insert(
                    LocationCode::from(code),
                    IndividualSnapshot::new(Snapshot {
                        last_deaths: deaths,
                        last_confirmed: confirmed,
                    }),
                );
            }
        }

        pub(crate) fn fail(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    impl SnapshotSource for FakeSource {
        async fn fetch(&self, code: &LocationCode) -> Result<IndividualSnapshot, StatsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(StatsError::Transport("connection refused".to_string()));
            }
            self.responses
                .lock()
                .ok()
                .and_then(|map| map.get(code).cloned())
                .ok_or_else(|| StatsError::Transport(format!("GET {code} returned 404")))
        }
    }

    pub(crate) fn global_data() -> GlobalData {
        let mut globals = HashMap::new();
        globals.insert(
            LocationCode::from("US-Cook-IL"),
            TrackedLocation {
                title: "Cook, Illinois".to_string(),
                admin: Some("Cook".to_string()),
                province_state: "Illinois".to_string(),
                country_region: "US".to_string(),
                lat: "41.84".to_string(),
                long: "-87.81".to_string(),
            },
        );
        globals.insert(
            LocationCode::from("FR"),
            TrackedLocation {
                title: "France".to_string(),
                admin: None,
                province_state: String::new(),
                country_region: "France".to_string(),
                lat: "46.22".to_string(),
                long: "2.21".to_string(),
            },
        );
        GlobalData {
            time: Utc::now(),
            version: FORMAT_VERSION,
            globals,
        }
    }
}
