//! Viewport-driven fetching.
//!
//! [`FetchCoordinator`] owns the load state for one map surface. It decides
//! what to fetch for each camera change, serves what it can from the
//! [`RegionCache`](crate::cache::RegionCache), and publishes [`MapData`]
//! snapshots to subscribers.

mod config;
mod coordinator;
mod state;

pub use config::{
    FetchConfig, DEFAULT_CLUSTER_PREFETCH_MULTIPLIER, DEFAULT_LOCATION_PREFETCH_MULTIPLIER,
    DEFAULT_LOCATION_ZOOM_THRESHOLD,
};
pub use coordinator::FetchCoordinator;
pub use state::{FetchOutcome, LoadState, MapData, RequestMarker};
