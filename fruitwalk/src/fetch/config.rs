//! Configuration for viewport fetching.

use crate::cache::StaleEntryPolicy;
use crate::model::FetchKind;

// ==================== Fetch Defaults ====================

/// Default zoom at which the map switches from clusters to locations.
///
/// Must not exceed the server's own per-location zoom floor, or the client
/// would ask for points the server refuses to return.
pub const DEFAULT_LOCATION_ZOOM_THRESHOLD: u8 = 14;

/// Default prefetch multiplier for location requests.
pub const DEFAULT_LOCATION_PREFETCH_MULTIPLIER: f64 = 1.5;

/// Default prefetch multiplier for cluster requests.
///
/// Clusters are cheap, so a wider margin is fetched.
pub const DEFAULT_CLUSTER_PREFETCH_MULTIPLIER: f64 = 2.0;

/// Settings for the fetch coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Zooms at or above this fetch locations. Below it, clusters.
    pub location_zoom_threshold: u8,

    /// Linear expansion applied to location requests before fetching.
    pub location_prefetch_multiplier: f64,

    /// Linear expansion applied to cluster requests before fetching.
    pub cluster_prefetch_multiplier: f64,

    /// What the region cache does with entries that miss.
    pub stale_entry_policy: StaleEntryPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            location_zoom_threshold: DEFAULT_LOCATION_ZOOM_THRESHOLD,
            location_prefetch_multiplier: DEFAULT_LOCATION_PREFETCH_MULTIPLIER,
            cluster_prefetch_multiplier: DEFAULT_CLUSTER_PREFETCH_MULTIPLIER,
            stale_entry_policy: StaleEntryPolicy::default(),
        }
    }
}

impl FetchConfig {
    pub fn with_location_zoom_threshold(mut self, zoom: u8) -> Self {
        self.location_zoom_threshold = zoom;
        self
    }

    pub fn with_location_prefetch_multiplier(mut self, multiplier: f64) -> Self {
        self.location_prefetch_multiplier = multiplier;
        self
    }

    pub fn with_cluster_prefetch_multiplier(mut self, multiplier: f64) -> Self {
        self.cluster_prefetch_multiplier = multiplier;
        self
    }

    pub fn with_stale_entry_policy(mut self, policy: StaleEntryPolicy) -> Self {
        self.stale_entry_policy = policy;
        self
    }

    /// Chooses locations or clusters for a zoom level.
    ///
    /// The threshold itself fetches locations.
    pub fn kind_for_zoom(&self, zoom: u8) -> FetchKind {
        if zoom < self.location_zoom_threshold {
            FetchKind::Clusters
        } else {
            FetchKind::Locations
        }
    }

    pub fn prefetch_multiplier(&self, kind: FetchKind) -> f64 {
        match kind {
            FetchKind::Locations => self.location_prefetch_multiplier,
            FetchKind::Clusters => self.cluster_prefetch_multiplier,
        }
    }
}
