//! Map items returned by the locations and clusters endpoints.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A single foraging location.
///
/// Decoded from the locations endpoint. `favorite` is local state and never
/// crosses the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitLocation {
    pub id: u64,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub type_ids: Vec<u32>,
    /// Distance from the query center in metres, when the server sends it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_names: Option<Vec<String>>,
    #[serde(skip)]
    pub favorite: bool,
}

impl FruitLocation {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Type names joined for display.
    pub fn display_name(&self) -> String {
        match &self.type_names {
            Some(names) if !names.is_empty() => names.join(", "),
            _ => String::from("Unknown"),
        }
    }
}

/// A server-side aggregate of nearby locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FruitCluster {
    pub lat: f64,
    pub lng: f64,
    pub count: u64,
}

impl FruitCluster {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}
