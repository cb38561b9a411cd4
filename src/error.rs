//! Error types for statistics derivation, formatting and snapshot I/O.
//!
//! [`StatsError`] is the single error type of the crate. Each variant
//! carries a stable numeric code so a presentation layer can map failures
//! without matching on message text.

use crate::domain::LocationCode;

/// Crate-wide error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category                  |
/// |-----------|---------------------------|
/// | 1000–1999 | Invalid input / data      |
/// | 2000–2999 | Lookup (missing entries)  |
/// | 3000–3999 | I/O, decode, config       |
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Location code is not present in the location metadata table.
    #[error("location not found: {0}")]
    MissingLocation(LocationCode),

    /// Location code has no snapshot loaded.
    #[error("snapshot not found: {0}")]
    MissingSnapshot(LocationCode),

    /// A series is too short to derive a total and a delta.
    #[error("insufficient data: {series} series has {len} element(s), need at least 2")]
    InsufficientData {
        /// Which series was short (`"deaths"` or `"confirmed"`).
        series: &'static str,
        /// Actual length of the series.
        len: usize,
    },

    /// A value is outside the domain of the operation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// JSON payload could not be decoded.
    #[error("decode failure: {0}")]
    Decode(#[from] serde_json::Error),

    /// Payload declares a format version this crate does not understand.
    #[error("format version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version this crate decodes.
        expected: u32,
        /// Version found in the payload.
        found: u32,
    },

    /// Network or HTTP failure while fetching a snapshot.
    #[error("transport error: {0}")]
    Transport(String),

    /// On-disk snapshot cache failure.
    #[error("cache error: {0}")]
    Cache(String),

    /// Invalid configuration or missing bundled data.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StatsError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidInput(_) => 1001,
            Self::InsufficientData { .. } => 1002,
            Self::MissingLocation(_) => 2001,
            Self::MissingSnapshot(_) => 2002,
            Self::Decode(_) => 3001,
            Self::VersionMismatch { .. } => 3002,
            Self::Transport(_) => 3003,
            Self::Cache(_) => 3004,
            Self::Config(_) => 3005,
        }
    }

    /// Returns `true` for failures of the derivation itself, as opposed to
    /// I/O at the boundary.
    #[must_use]
    pub const fn is_derivation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingLocation(_)
                | Self::MissingSnapshot(_)
                | Self::InsufficientData { .. }
                | Self::InvalidInput(_)
        )
    }
}

impl From<reqwest::Error> for StatsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
