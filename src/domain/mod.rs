//! Domain layer: locations, snapshots, derived stats and refresh events.
//!
//! Everything in here is pure data and pure derivation, apart from the
//! [`EventBus`] which only fans out already-derived values.

pub mod event_bus;
pub mod location;
pub mod location_code;
pub mod series;
pub mod snapshot;
pub mod stats;
pub mod stats_event;

pub use event_bus::EventBus;
pub use location::{Caption, TrackedLocation};
pub use location_code::LocationCode;
pub use snapshot::{
    FORMAT_VERSION, GlobalData, IndividualSnapshot, Snapshot, SnapshotData, Versioned,
    decode_envelope,
};
pub use stats::{Stats, build_stats};
pub use stats_event::StatsEvent;
