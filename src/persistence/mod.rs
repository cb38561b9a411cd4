//! Persistence layer: bundled reference files and the snapshot cache.
//!
//! The bundle is read-only input loaded once at initialization. The
//! [`SnapshotCache`] keeps the last fetched snapshot of each location on
//! disk so a failed fetch can still be served from the previous copy.

pub mod bundle;
pub mod cache;

pub use bundle::{decode_global_data, load_global_data, load_snapshot_data};
pub use cache::SnapshotCache;
