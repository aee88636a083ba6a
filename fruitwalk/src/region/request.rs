//! The unit of work handed to the fetch layer.

use std::fmt;

use crate::geo::BoundingBox;

/// A zoom level paired with the bounding box to fetch at that zoom.
///
/// Two requests are equal only if their zoom and all four corners match
/// exactly. Use [`ViewportRequest::satisfies`] for the looser "already
/// covered" check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRequest {
    pub zoom: u8,
    pub bounds: BoundingBox,
}

impl ViewportRequest {
    pub const fn new(zoom: u8, bounds: BoundingBox) -> Self {
        Self { zoom, bounds }
    }

    /// Returns true if data fetched for `self` also covers `other`.
    ///
    /// That holds when both requests share a zoom level and `self`'s bounds
    /// contain `other`'s.
    pub fn satisfies(&self, other: &ViewportRequest) -> bool {
        self.zoom == other.zoom && self.bounds.contains(&other.bounds)
    }
}

impl fmt::Display for ViewportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "z{} {}", self.zoom, self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(sw: f64, ne: f64) -> BoundingBox {
        BoundingBox::new(sw, sw, ne, ne)
    }

    #[test]
    fn test_equality_is_exact() {
        let a = ViewportRequest::new(15, bbox(1.0, 2.0));
        let b = ViewportRequest::new(15, bbox(1.0, 2.0));
        let c = ViewportRequest::new(15, bbox(1.0, 2.0 + f64::EPSILON * 2.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, ViewportRequest::new(16, bbox(1.0, 2.0)));
    }

    #[test]
    fn test_satisfies_requires_same_zoom() {
        let wide = ViewportRequest::new(15, bbox(0.0, 10.0));
        let narrow = ViewportRequest::new(15, bbox(2.0, 8.0));
        let narrow_other_zoom = ViewportRequest::new(16, bbox(2.0, 8.0));

        assert!(wide.satisfies(&narrow));
        assert!(wide.satisfies(&wide));
        assert!(!narrow.satisfies(&wide));
        assert!(!wide.satisfies(&narrow_other_zoom));
    }
}
