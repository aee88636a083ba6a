//! Axis-aligned geographic bounding boxes.

use std::fmt;

use super::types::{Coordinate, GeoError};
use super::lat_lon_span_for_distance;

/// A geographic rectangle described by its south-west and north-east corners.
///
/// The zero value is a degenerate box at (0, 0). Equality compares all four
/// corners exactly, which is what request deduplication relies on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub south_west_lat: f64,
    pub south_west_lng: f64,
    pub north_east_lat: f64,
    pub north_east_lng: f64,
}

impl BoundingBox {
    /// Creates a bounding box from explicit corners.
    ///
    /// Corners are stored as given. Callers are expected to pass the
    /// south-west corner first.
    pub const fn new(
        south_west_lat: f64,
        south_west_lng: f64,
        north_east_lat: f64,
        north_east_lng: f64,
    ) -> Self {
        Self {
            south_west_lat,
            south_west_lng,
            north_east_lat,
            north_east_lng,
        }
    }

    /// Creates a box symmetric around `center`, `lat_span` tall and
    /// `lon_span` wide.
    pub fn from_center_and_span(center: Coordinate, lat_span: f64, lon_span: f64) -> Self {
        let half_lat = lat_span / 2.0;
        let half_lon = lon_span / 2.0;
        Self::new(
            center.lat - half_lat,
            center.lng - half_lon,
            center.lat + half_lat,
            center.lng + half_lon,
        )
    }

    /// Creates a box whose sides are `distance_km` across, centered on `center`.
    ///
    /// # Errors
    ///
    /// Returns an error if the distance is negative or the center latitude is
    /// invalid.
    pub fn from_center_and_radius(center: Coordinate, distance_km: f64) -> Result<Self, GeoError> {
        let (lat_span, lon_span) = lat_lon_span_for_distance(center.lat, distance_km)?;
        Ok(Self::from_center_and_span(center, lat_span, lon_span))
    }

    pub fn south_west(&self) -> Coordinate {
        Coordinate::new(self.south_west_lat, self.south_west_lng)
    }

    pub fn north_east(&self) -> Coordinate {
        Coordinate::new(self.north_east_lat, self.north_east_lng)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west_lat + self.north_east_lat) / 2.0,
            (self.south_west_lng + self.north_east_lng) / 2.0,
        )
    }

    /// Latitude extent in degrees.
    pub fn height(&self) -> f64 {
        self.north_east_lat - self.south_west_lat
    }

    /// Longitude extent in degrees.
    pub fn width(&self) -> f64 {
        self.north_east_lng - self.south_west_lng
    }

    /// Returns true if `other` lies entirely inside this box.
    ///
    /// Containment is non-strict, so a box contains itself.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.south_west_lat <= other.south_west_lat
            && self.south_west_lng <= other.south_west_lng
            && self.north_east_lat >= other.north_east_lat
            && self.north_east_lng >= other.north_east_lng
    }

    /// Returns true if `point` lies inside or on the edge of this box.
    pub fn contains_point(&self, point: &Coordinate) -> bool {
        point.lat >= self.south_west_lat
            && point.lat <= self.north_east_lat
            && point.lng >= self.south_west_lng
            && point.lng <= self.north_east_lng
    }

    /// Serializes the box in the API's `swLat,swLng|neLat,neLng` form.
    pub fn to_query_value(&self) -> String {
        format!(
            "{},{}|{},{}",
            self.south_west_lat, self.south_west_lng, self.north_east_lat, self.north_east_lng
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.5},{:.5} → {:.5},{:.5}] ({:.5}° × {:.5}°)",
            self.south_west_lat,
            self.south_west_lng,
            self.north_east_lat,
            self.north_east_lng,
            self.height(),
            self.width()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_from_center_and_span() {
        let bbox = BoundingBox::from_center_and_span(Coordinate::new(38.0, -122.0), 0.01, 0.02);
        assert!(approx(bbox.south_west_lat, 37.995));
        assert!(approx(bbox.south_west_lng, -122.01));
        assert!(approx(bbox.north_east_lat, 38.005));
        assert!(approx(bbox.north_east_lng, -121.99));
        assert!(approx(bbox.height(), 0.01));
        assert!(approx(bbox.width(), 0.02));
        assert!(approx(bbox.center().lat, 38.0));
    }

    #[test]
    fn test_contains_is_non_strict() {
        let bbox = BoundingBox::new(10.0, 20.0, 11.0, 21.0);
        assert!(bbox.contains(&bbox));
    }

    #[test]
    fn test_contains_rejects_overlap() {
        let outer = BoundingBox::new(10.0, 20.0, 11.0, 21.0);
        let inner = BoundingBox::new(10.2, 20.2, 10.8, 20.8);
        let straddling = BoundingBox::new(10.5, 20.5, 11.5, 21.5);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&straddling));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let bbox = BoundingBox::new(10.0, 20.0, 11.0, 21.0);
        assert!(bbox.contains_point(&Coordinate::new(10.0, 20.0)));
        assert!(bbox.contains_point(&Coordinate::new(11.0, 21.0)));
        assert!(bbox.contains_point(&Coordinate::new(10.5, 20.5)));
        assert!(!bbox.contains_point(&Coordinate::new(11.0001, 20.5)));
        assert!(!bbox.contains_point(&Coordinate::new(10.5, 19.9)));
    }

    #[test]
    fn test_zero_value_is_degenerate() {
        let zero = BoundingBox::default();
        assert_eq!(zero.width(), 0.0);
        assert_eq!(zero.height(), 0.0);
        assert!(!zero.contains(&BoundingBox::new(-1.0, -1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_query_value_format() {
        let bbox = BoundingBox::new(37.5, -122.25, 38.5, -121.75);
        assert_eq!(bbox.to_query_value(), "37.5,-122.25|38.5,-121.75");
    }

    #[test]
    fn test_from_center_and_radius() {
        let bbox = BoundingBox::from_center_and_radius(Coordinate::new(0.0, 0.0), 111.19).unwrap();
        // One degree of arc at the equator is roughly 111.19 km
        assert!((bbox.height() - 1.0).abs() < 1e-3);
        assert!((bbox.width() - 1.0).abs() < 1e-3);

        assert!(BoundingBox::from_center_and_radius(Coordinate::new(0.0, 0.0), -1.0).is_err());
    }

    fn arb_box() -> impl Strategy<Value = BoundingBox> {
        (-80.0..80.0f64, -170.0..170.0f64, 0.0..5.0f64, 0.0..5.0f64)
            .prop_map(|(lat, lng, h, w)| BoundingBox::new(lat, lng, lat + h, lng + w))
    }

    fn shrink(bbox: BoundingBox, a: f64, b: f64, c: f64, d: f64) -> BoundingBox {
        BoundingBox::new(
            bbox.south_west_lat + bbox.height() * a / 2.0,
            bbox.south_west_lng + bbox.width() * b / 2.0,
            bbox.north_east_lat - bbox.height() * c / 2.0,
            bbox.north_east_lng - bbox.width() * d / 2.0,
        )
    }

    proptest! {
        #[test]
        fn prop_contains_is_transitive(
            outer in arb_box(),
            a in 0.0..0.9f64, b in 0.0..0.9f64, c in 0.0..0.9f64, d in 0.0..0.9f64,
            e in 0.0..0.9f64, f in 0.0..0.9f64, g in 0.0..0.9f64, h in 0.0..0.9f64,
        ) {
            let middle = shrink(outer, a, b, c, d);
            let inner = shrink(middle, e, f, g, h);
            prop_assert!(outer.contains(&middle));
            prop_assert!(middle.contains(&inner));
            prop_assert!(outer.contains(&inner));
        }

        #[test]
        fn prop_box_contains_its_corners(bbox in arb_box()) {
            prop_assert!(bbox.contains_point(&bbox.south_west()));
            prop_assert!(bbox.contains_point(&bbox.north_east()));
            prop_assert!(bbox.contains_point(&bbox.center()));
        }
    }
}
