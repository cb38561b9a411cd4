//! Events emitted when a location's statistics are refreshed.
//!
//! Every refresh publishes a [`StatsEvent`] through the
//! [`super::EventBus`], whether it produced new stats or failed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{LocationCode, Stats};

/// Outcome of a refresh for one location.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum StatsEvent {
    /// New stats were derived from a fresh snapshot.
    Updated {
        /// Location code.
        code: LocationCode,
        /// The derived stats.
        stats: Box<Stats>,
    },

    /// The refresh failed; previously published stats remain current.
    RefreshFailed {
        /// Location code.
        code: LocationCode,
        /// Human-readable failure reason.
        reason: String,
        /// Failure timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl StatsEvent {
    /// Returns the location code this event refers to.
    #[must_use]
    pub fn code(&self) -> &LocationCode {
        match self {
            Self::Updated { code, .. } | Self::RefreshFailed { code, .. } => code,
        }
    }

    /// Returns the event type as a string.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Updated { .. } => "updated",
            Self::RefreshFailed { .. } => "refresh_failed",
        }
    }

    /// Returns the stats carried by an [`StatsEvent::Updated`] event.
    #[must_use]
    pub fn stats(&self) -> Option<&Stats> {
        match self {
            Self::Updated { stats, .. } => Some(stats.as_ref()),
            Self::RefreshFailed { .. } => None,
        }
    }
}
