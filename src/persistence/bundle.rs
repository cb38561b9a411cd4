//! Loading of the bundled reference files.
//!
//! The location table ships with the app and is read once at start-up;
//! a batch snapshot file with the same envelope can be loaded the same
//! way. Failures are returned to the caller, never turned into an abort.

use std::path::Path;

use crate::domain::{GlobalData, SnapshotData, decode_envelope};
use crate::error::StatsError;

/// Reads and decodes the bundled location table.
///
/// # Errors
///
/// Returns [`StatsError::Config`] if the file cannot be read,
/// [`StatsError::Decode`] if it is malformed and
/// [`StatsError::VersionMismatch`] for an unknown format version.
pub async fn load_global_data(path: &Path) -> Result<GlobalData, StatsError> {
    let bytes = read_bundle(path).await?;
    let data = decode_global_data(&bytes)?;
    tracing::info!(
        path = %path.display(),
        locations = data.globals.len(),
        generated = %data.time,
        "location table loaded"
    );
    Ok(data)
}

/// Decodes a location table already held in memory.
///
/// For apps that embed the table in their binary instead of shipping it
/// as a file.
///
/// # Errors
///
/// Returns [`StatsError::Decode`] if the bytes are malformed and
/// [`StatsError::VersionMismatch`] for an unknown format version.
pub fn decode_global_data(bytes: &[u8]) -> Result<GlobalData, StatsError> {
    decode_envelope(bytes)
}

/// Reads and decodes a multi-location snapshot file.
///
/// # Errors
///
/// Same as [`load_global_data`].
pub async fn load_snapshot_data(path: &Path) -> Result<SnapshotData, StatsError> {
    let bytes = read_bundle(path).await?;
    let data: SnapshotData = decode_envelope(&bytes)?;
    tracing::info!(
        path = %path.display(),
        snapshots = data.snapshots.len(),
        "snapshot batch loaded"
    );
    Ok(data)
}

async fn read_bundle(path: &Path) -> Result<Vec<u8>, StatsError> {
    tokio::fs::read(path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "cannot read bundled data");
        StatsError::Config(format!("cannot read {}: {e}", path.display()))
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::LocationCode;

    const GLOBAL: &str = r#"{
        "time": "2020-10-07T00:00:00Z",
        "version": 1,
        "globals": {
            "US-Cook-IL": {"title":"Cook, Illinois","admin":"Cook","proviceState":"Illinois",
                           "countryRegion":"US","lat":"41.84","long":"-87.81"}
        }
    }"#;

    #[tokio::test]
    async fn loads_global_data_from_disk() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("global");
        let Ok(()) = tokio::fs::write(&path, GLOBAL).await else {
            panic!("write");
        };

        let Ok(data) = load_global_data(&path).await else {
            panic!("load failed");
        };
        assert!(data.globals.contains_key(&LocationCode::from("US-Cook-IL")));
    }

    #[test]
    fn decodes_global_data_from_bytes() {
        let Ok(data) = decode_global_data(GLOBAL.as_bytes()) else {
            panic!("decode failed");
        };
        let Some(cook) = data.globals.get(&LocationCode::from("US-Cook-IL")) else {
            panic!("missing location");
        };
        assert_eq!(cook.country_region, "US");
        assert_eq!(data.version, 1);
    }

    #[test]
    fn rejects_global_data_with_unknown_version() {
        let json = GLOBAL.replace("\"version\": 1", "\"version\": 2");
        let result = decode_global_data(json.as_bytes());
        assert!(matches!(
            result,
            Err(StatsError::VersionMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[tokio::test]
    async fn missing_bundle_is_a_config_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let result = load_global_data(&dir.path().join("absent")).await;
        assert!(matches!(result, Err(StatsError::Config(_))));
    }

    #[tokio::test]
    async fn malformed_bundle_is_a_decode_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("global");
        let Ok(()) = tokio::fs::write(&path, "not json").await else {
            panic!("write");
        };
        let result = load_global_data(&path).await;
        assert!(matches!(result, Err(StatsError::Decode(_))));
    }

    #[tokio::test]
    async fn loads_snapshot_batch() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("individual");
        let json = r#"{"time":"2020-10-07T00:00:00Z","version":1,
                       "snapshots":{"FR":{"lastDeaths":[1,2],"lastConfirmed":[3,4]}}}"#;
        let Ok(()) = tokio::fs::write(&path, json).await else {
            panic!("write");
        };
        let Ok(data) = load_snapshot_data(&path).await else {
            panic!("load failed");
        };
        assert_eq!(data.snapshots.len(), 1);
    }
}
