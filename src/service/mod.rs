//! Service layer: snapshot acquisition and stats orchestration.
//!
//! [`SnapshotStore`] owns the loaded data and talks to a
//! [`SnapshotSource`]; [`StatsService`] derives stats from it and emits
//! events through the [`super::domain::EventBus`].

pub mod source;
pub mod stats_service;
pub mod store;

pub use source::{HttpSnapshotSource, SnapshotSource};
pub use stats_service::StatsService;
pub use store::SnapshotStore;
