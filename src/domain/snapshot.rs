//! Raw snapshots and the versioned JSON envelopes they arrive in.
//!
//! Three envelopes share the `{ "time", "version", ... }` shape:
//! [`GlobalData`] (bundled location table), [`IndividualSnapshot`] (one
//! location, as served per code) and [`SnapshotData`] (many locations in
//! one file). Decoding always checks `version` against [`FORMAT_VERSION`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{LocationCode, TrackedLocation};
use crate::error::StatsError;

/// Envelope format version this crate decodes.
pub const FORMAT_VERSION: u32 = 1;

/// Last N cumulative daily counts for one location, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cumulative death counts.
    #[serde(rename = "lastDeaths", default)]
    pub last_deaths: Vec<i64>,

    /// Cumulative confirmed-case counts.
    #[serde(rename = "lastConfirmed", default)]
    pub last_confirmed: Vec<i64>,
}

/// Bundled table of every tracked location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalData {
    /// Generation time of the bundle.
    pub time: DateTime<Utc>,
    /// Envelope format version.
    pub version: u32,
    /// Location metadata keyed by code.
    #[serde(default)]
    pub globals: HashMap<LocationCode, TrackedLocation>,
}

/// Snapshot for a single location, as served per code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualSnapshot {
    /// Time the data was aggregated.
    pub time: DateTime<Utc>,
    /// Envelope format version.
    pub version: u32,
    /// The snapshot itself.
    pub snapshot: Snapshot,
}

/// Snapshots for many locations in one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotData {
    /// Time the data was aggregated.
    pub time: DateTime<Utc>,
    /// Envelope format version.
    pub version: u32,
    /// Snapshots keyed by code.
    #[serde(default)]
    pub snapshots: HashMap<LocationCode, Snapshot>,
}

/// Common accessor for the version field of every envelope.
pub trait Versioned {
    /// Returns the declared format version.
    fn version(&self) -> u32;

    /// Checks the declared version against [`FORMAT_VERSION`].
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::VersionMismatch`] if they differ.
    fn check_version(&self) -> Result<(), StatsError> {
        let found = self.version();
        if found == FORMAT_VERSION {
            Ok(())
        } else {
            tracing::warn!(expected = FORMAT_VERSION, found, "format version mismatch");
            Err(StatsError::VersionMismatch {
                expected: FORMAT_VERSION,
                found,
            })
        }
    }
}

impl Versioned for GlobalData {
    fn version(&self) -> u32 {
        self.version
    }
}

impl Versioned for IndividualSnapshot {
    fn version(&self) -> u32 {
        self.version
    }
}

impl Versioned for SnapshotData {
    fn version(&self) -> u32 {
        self.version
    }
}

impl IndividualSnapshot {
    /// Wraps a snapshot in a current-version envelope stamped now.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            time: Utc::now(),
            version: FORMAT_VERSION,
            snapshot,
        }
    }
}

/// Decodes a versioned envelope from JSON bytes.
///
/// # Errors
///
/// Returns [`StatsError::Decode`] for malformed JSON and
/// [`StatsError::VersionMismatch`] for an unexpected version.
pub fn decode_envelope<T>(bytes: &[u8]) -> Result<T, StatsError>
where
    T: DeserializeOwned + Versioned,
{
    let envelope: T = serde_json::from_slice(bytes)?;
    envelope.check_version()?;
    Ok(envelope)
}
