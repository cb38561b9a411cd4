//! On-disk cache of per-location snapshots.
//!
//! One JSON file per location code, named after
//! [`LocationCode::file_stem`]. Writes go to a temporary file first and
//! are renamed into place so a reader never sees a partial file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{IndividualSnapshot, LocationCode, decode_envelope};
use crate::error::StatsError;

/// Directory-backed snapshot cache.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    /// Creates a cache rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path used for `code`.
    #[must_use]
    pub fn path_for(&self, code: &LocationCode) -> PathBuf {
        self.dir.join(format!("{}.json", code.file_stem()))
    }

    /// Loads the cached snapshot for `code`.
    ///
    /// A missing file and an undecodable file are both a miss; the latter
    /// is logged.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Cache`] if the file exists but cannot be read.
    pub async fn load(&self, code: &LocationCode) -> Result<Option<IndividualSnapshot>, StatsError> {
        let path = self.path_for(code);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(%code, "cache miss");
                return Ok(None);
            }
            Err(e) => {
                return Err(StatsError::Cache(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };

        match decode_envelope::<IndividualSnapshot>(&bytes) {
            Ok(snapshot) => {
                tracing::debug!(%code, time = %snapshot.time, "cache hit");
                Ok(Some(snapshot))
            }
            Err(e) => {
                tracing::warn!(%code, error = %e, "ignoring unreadable cache entry");
                Ok(None)
            }
        }
    }

    /// Writes `snapshot` as the cached copy for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Cache`] on I/O failure and
    /// [`StatsError::Decode`] if the snapshot cannot be serialized.
    pub async fn store(
        &self,
        code: &LocationCode,
        snapshot: &IndividualSnapshot,
    ) -> Result<(), StatsError> {
        let json = serde_json::to_vec(snapshot)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| cache_error("create", &self.dir, &e))?;

        let path = self.path_for(code);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| cache_error("write", &tmp, &e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| cache_error("rename", &path, &e))?;

        tracing::debug!(%code, bytes = json.len(), "snapshot cached");
        Ok(())
    }
}

fn cache_error(op: &str, path: &Path, err: &std::io::Error) -> StatsError {
    StatsError::Cache(format!("cannot {op} {}: {err}", path.display()))
}
