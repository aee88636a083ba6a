//! Observable map state and fetch bookkeeping.

use std::fmt;
use std::sync::Arc;

use crate::api::ApiError;
use crate::geo::BoundingBox;
use crate::model::{FruitCluster, FruitLocation, Payload};
use crate::region::ViewportRequest;

/// Load status of the map.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// A request is outstanding.
    Loading,
    /// The committed payload matches the last request.
    Loaded,
    /// The last request failed. The previous payload is still shown.
    Failed(ApiError),
    /// Loading was reset from outside.
    Cancelled,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Loading => write!(f, "loading"),
            LoadState::Loaded => write!(f, "loaded"),
            LoadState::Failed(e) => write!(f, "failed: {}", e),
            LoadState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Snapshot of what the map should display.
///
/// Published on a watch channel each time status or payload changes.
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub status: LoadState,
    pub locations: Arc<Vec<FruitLocation>>,
    pub clusters: Arc<Vec<FruitCluster>>,
    /// The request that produced the committed payload
    pub request: Option<ViewportRequest>,
}

impl Default for MapData {
    fn default() -> Self {
        Self {
            status: LoadState::Loaded,
            locations: Arc::default(),
            clusters: Arc::default(),
            request: None,
        }
    }
}

impl MapData {
    /// Replaces the displayed items with `payload`.
    ///
    /// Locations and clusters are mutually exclusive on screen, so the other
    /// list is cleared.
    pub(crate) fn commit(&mut self, payload: Payload, request: ViewportRequest) {
        match payload {
            Payload::Locations(locations) => {
                self.locations = locations;
                self.clusters = Arc::default();
            }
            Payload::Clusters(clusters) => {
                self.clusters = clusters;
                self.locations = Arc::default();
            }
        }
        self.request = Some(request);
        self.status = LoadState::Loaded;
    }

    pub(crate) fn reset(&mut self) {
        self.locations = Arc::default();
        self.clusters = Arc::default();
        self.request = None;
    }

    /// Locations inside `bounds`.
    ///
    /// Payloads are fetched with a prefetch margin, so callers showing a list
    /// of what is on screen filter to the visible box.
    pub fn locations_in(&self, bounds: &BoundingBox) -> Vec<&FruitLocation> {
        self.locations
            .iter()
            .filter(|location| bounds.contains_point(&location.coordinate()))
            .collect()
    }
}

/// The coordinator's outstanding-request marker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RequestMarker {
    #[default]
    Idle,
    InFlight(ViewportRequest),
}

impl RequestMarker {
    pub fn in_flight(&self) -> Option<&ViewportRequest> {
        match self {
            RequestMarker::InFlight(request) => Some(request),
            RequestMarker::Idle => None,
        }
    }
}

/// How a single fetch attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The request was already loading or loaded. Nothing was done.
    AlreadyCovered,
    /// Served from the region cache without touching the network.
    CacheHit,
    /// Fetched from the network and committed.
    Fetched,
    /// The network fetch failed and the failure was published.
    Failed(ApiError),
    /// A newer request superseded this one. The result was discarded.
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: u64, lat: f64, lng: f64) -> FruitLocation {
        FruitLocation {
            id,
            lat,
            lng,
            type_ids: vec![],
            distance: None,
            photo: None,
            type_names: None,
            favorite: false,
        }
    }

    fn request() -> ViewportRequest {
        ViewportRequest::new(15, BoundingBox::new(0.0, 0.0, 1.0, 1.0))
    }

    #[test]
    fn test_commit_replaces_other_kind() {
        let mut data = MapData::default();
        data.commit(vec![location(1, 0.5, 0.5)].into(), request());
        assert_eq!(data.locations.len(), 1);

        let clusters: Payload = vec![FruitCluster {
            lat: 0.5,
            lng: 0.5,
            count: 2,
        }]
        .into();
        data.commit(clusters, request());
        assert!(data.locations.is_empty());
        assert_eq!(data.clusters.len(), 1);
        assert_eq!(data.status, LoadState::Loaded);
        assert_eq!(data.request, Some(request()));
    }

    #[test]
    fn test_locations_in_filters_to_bounds() {
        let mut data = MapData::default();
        data.commit(
            vec![location(1, 0.5, 0.5), location(2, 5.0, 5.0)].into(),
            request(),
        );

        let visible = data.locations_in(&BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn test_load_state_display() {
        assert_eq!(LoadState::Loading.to_string(), "loading");
        assert!(LoadState::Failed(ApiError::NoData)
            .to_string()
            .starts_with("failed"));
        assert_eq!(
            LoadState::Failed(ApiError::NoData).error(),
            Some(&ApiError::NoData)
        );
    }

    #[test]
    fn test_marker() {
        assert_eq!(RequestMarker::default().in_flight(), None);
        assert_eq!(
            RequestMarker::InFlight(request()).in_flight(),
            Some(&request())
        );
    }
}
