//! # covid-stats
//!
//! Data model and formatting layer for COVID-19 case/death statistics.
//!
//! Pre-aggregated cumulative snapshots are fetched per location code,
//! turned into display-ready [`domain::Stats`] (current totals, last-period
//! deltas, full series and per-period deltas) and rendered for humans by
//! the [`format::MagnitudeFormatter`] (`"1.2k"`, `"+3.4M"`).
//!
//! ## Architecture
//!
//! ```text
//! Presentation layer
//!     │
//!     ├── StatsClient (client)            explicit initialization
//!     ├── MagnitudeFormatter (format/)
//!     │
//!     ├── StatsService (service/)  ──►  EventBus (domain/)
//!     ├── SnapshotStore (service/)
//!     │       ├── HttpSnapshotSource (service/)
//!     │       └── SnapshotCache (persistence/)
//!     │
//!     └── build_stats / series (domain/)
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod persistence;
pub mod service;
pub mod telemetry;

pub use client::StatsClient;
pub use error::StatsError;
pub use format::{fmt_delta, fmt_digit, fmt_large, fmt_signed_delta};
