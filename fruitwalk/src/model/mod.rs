//! Data returned by the Falling Fruit API.
//!
//! Map payloads are shared between the cache and the published map state, so
//! they are held behind `Arc` and cloned cheaply.

mod details;
mod fruit_type;
mod location;

pub use details::{LocationDetails, PropertyAccess};
pub use fruit_type::FruitType;
pub use location::{FruitCluster, FruitLocation};

use std::fmt;
use std::sync::Arc;

/// Which map endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    /// Individual locations, used when zoomed in
    Locations,
    /// Server-side clusters, used when zoomed out
    Clusters,
}

impl FetchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchKind::Locations => "locations",
            FetchKind::Clusters => "clusters",
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of a map fetch: either points or clusters.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Locations(Arc<Vec<FruitLocation>>),
    Clusters(Arc<Vec<FruitCluster>>),
}

impl Payload {
    pub fn kind(&self) -> FetchKind {
        match self {
            Payload::Locations(_) => FetchKind::Locations,
            Payload::Clusters(_) => FetchKind::Clusters,
        }
    }

    /// Number of items in the payload.
    pub fn len(&self) -> usize {
        match self {
            Payload::Locations(items) => items.len(),
            Payload::Clusters(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<FruitLocation>> for Payload {
    fn from(locations: Vec<FruitLocation>) -> Self {
        Payload::Locations(Arc::new(locations))
    }
}

impl From<Vec<FruitCluster>> for Payload {
    fn from(clusters: Vec<FruitCluster>) -> Self {
        Payload::Clusters(Arc::new(clusters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_kind_and_len() {
        let clusters: Payload = vec![FruitCluster {
            lat: 1.0,
            lng: 2.0,
            count: 3,
        }]
        .into();
        assert_eq!(clusters.kind(), FetchKind::Clusters);
        assert_eq!(clusters.len(), 1);

        let locations: Payload = Vec::<FruitLocation>::new().into();
        assert_eq!(locations.kind(), FetchKind::Locations);
        assert!(locations.is_empty());
    }

    #[test]
    fn test_fetch_kind_display() {
        assert_eq!(FetchKind::Locations.to_string(), "locations");
        assert_eq!(FetchKind::Clusters.to_string(), "clusters");
    }
}
