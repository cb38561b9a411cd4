//! Display-ready statistics derived from a location and its snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::series::{deltas, difference, last_two};
use super::{Caption, Snapshot, TrackedLocation};
use crate::error::StatsError;

/// Derived statistics for one location.
///
/// Built fresh from a [`Snapshot`] on every fetch and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Stats {
    /// Time the underlying data was aggregated.
    pub update_time: DateTime<Utc>,
    /// Primary label for the location.
    pub caption: String,
    /// Secondary label for the location.
    pub subcaption: Option<String>,
    /// Current cumulative case count.
    pub total_cases: i64,
    /// New cases in the last period.
    pub delta_cases: i64,
    /// Cumulative case series, oldest first.
    pub cases: Vec<i64>,
    /// Per-period case deltas.
    pub cases_delta: Vec<i64>,
    /// Current cumulative death count.
    pub total_deaths: i64,
    /// New deaths in the last period.
    pub delta_deaths: i64,
    /// Cumulative death series, oldest first.
    pub deaths: Vec<i64>,
    /// Per-period death deltas.
    pub deaths_delta: Vec<i64>,
    /// Latitude string from the location table.
    pub lat: String,
    /// Longitude string from the location table.
    pub long: String,
}

/// Derives [`Stats`] from a location and its snapshot.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientData`] if either series has fewer
/// than two elements, and [`StatsError::InvalidInput`] if a delta
/// overflows.
pub fn build_stats(
    location: &TrackedLocation,
    snapshot: &Snapshot,
    update_time: DateTime<Utc>,
) -> Result<Stats, StatsError> {
    let (prev_deaths, total_deaths) = last_two("deaths", &snapshot.last_deaths)?;
    let (prev_cases, total_cases) = last_two("confirmed", &snapshot.last_confirmed)?;
    let Caption {
        caption,
        subcaption,
    } = Caption::for_location(location);

    Ok(Stats {
        update_time,
        caption,
        subcaption,
        total_cases,
        delta_cases: difference(prev_cases, total_cases)?,
        cases: snapshot.last_confirmed.clone(),
        cases_delta: deltas(&snapshot.last_confirmed)?,
        total_deaths,
        delta_deaths: difference(prev_deaths, total_deaths)?,
        deaths: snapshot.last_deaths.clone(),
        deaths_delta: deltas(&snapshot.last_deaths)?,
        lat: location.lat.clone(),
        long: location.long.clone(),
    })
}

impl Stats {
    /// Derives stats stamped with the current time.
    ///
    /// # Errors
    ///
    /// See [`build_stats`].
    pub fn build(location: &TrackedLocation, snapshot: &Snapshot) -> Result<Self, StatsError> {
        build_stats(location, snapshot, Utc::now())
    }

    /// Fixed stand-in record for the explicit fallback mode.
    ///
    /// The numbers are not real data; only `caption` varies.
    #[must_use]
    pub fn placeholder(caption: impl Into<String>) -> Self {
        Self {
            update_time: Utc::now(),
            caption: caption.into(),
            subcaption: None,
            total_cases: 1234,
            delta_cases: 11,
            cases: Vec::new(),
            cases_delta: Vec::new(),
            total_deaths: 897,
            delta_deaths: 2,
            deaths: Vec::new(),
            deaths_delta: Vec::new(),
            lat: String::new(),
            long: String::new(),
        }
    }
}
