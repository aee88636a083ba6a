//! Geographic math for turning a map camera into API requests.
//!
//! The Falling Fruit API describes a request as a bounding box plus a Web
//! Mercator zoom level. Its zoom is computed against 128-pixel base tiles,
//! while map cameras use the usual 256-pixel tiles, so both variants live here.
//!
//! # Heading
//!
//! A rotated camera shows a wider longitude span than it would north-up. The
//! heading is folded into `[0°, 90°]` and the visible span is "straightened"
//! back to its north-up equivalent before the zoom is derived:
//!
//! ```text
//! straightened = w · lonSpan / (w · cos θ + h · sin θ)
//! zoom         = log2((360 · w / 128) / straightened)
//! ```
//!
//! All functions here are pure.

mod bounds;
mod types;

pub use bounds::BoundingBox;
pub use types::{Coordinate, GeoError, ViewSize, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Base tile size the API's zoom levels are computed against.
const API_TILE_SIZE: f64 = 128.0;

/// Base tile size of a standard Web Mercator camera.
const CAMERA_TILE_SIZE: f64 = 256.0;

/// Normalizes a heading into `[0, 360)`.
pub fn normalize_heading(heading: f64) -> f64 {
    let h = heading.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Folds a heading into `[0, 90]`.
///
/// Headings `h` and `h + 180` show the same region, as do `h` and `-h`.
pub fn fold_heading(heading: f64) -> f64 {
    let h = normalize_heading(heading);
    if h > 270.0 {
        360.0 - h
    } else if h > 90.0 {
        (h - 180.0).abs()
    } else {
        h
    }
}

/// Computes the continuous zoom level and north-up longitude span of a camera.
///
/// # Arguments
///
/// * `heading` - Camera rotation in degrees, any range
/// * `lat_span` - Visible latitude span in degrees
/// * `lon_span` - Visible longitude span in degrees
/// * `view` - View size in screen points
///
/// # Returns
///
/// `(zoom, straightened_lon_span)`. The zoom is not rounded.
///
/// # Errors
///
/// Returns an error if the heading is not finite, either span is not positive,
/// or the view has no area.
pub fn zoom_and_span(
    heading: f64,
    lat_span: f64,
    lon_span: f64,
    view: ViewSize,
) -> Result<(f64, f64), GeoError> {
    if !heading.is_finite() {
        return Err(GeoError::InvalidHeading(heading));
    }
    validate_span("latitude", lat_span)?;
    validate_span("longitude", lon_span)?;
    view.validate()?;

    let angle = fold_heading(heading).to_radians();
    let straightened =
        view.width * lon_span / (view.width * angle.cos() + view.height * angle.sin());
    let zoom = ((360.0 * view.width / API_TILE_SIZE) / straightened).log2();

    Ok((zoom, straightened))
}

/// Longitude span shown by a view of `view_width` points at `zoom`.
///
/// This is the inverse of [`zoom_and_span`] for a north-up camera.
pub fn span_for_zoom(zoom: u8, view_width: f64) -> f64 {
    360.0 * view_width / (API_TILE_SIZE * 2f64.powi(zoom as i32))
}

/// Latitude and longitude spans that cover `distance_km` around `center_lat`.
///
/// # Returns
///
/// `(lat_span, lon_span)` in degrees.
///
/// # Errors
///
/// Returns an error for a negative distance or a latitude outside the open
/// interval (-90, 90), where longitude spans are unbounded.
pub fn lat_lon_span_for_distance(center_lat: f64, distance_km: f64) -> Result<(f64, f64), GeoError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(GeoError::InvalidDistance(distance_km));
    }
    if !center_lat.is_finite() || center_lat.abs() >= MAX_LAT {
        return Err(GeoError::InvalidLatitude(center_lat));
    }

    let lat_span = (distance_km / EARTH_RADIUS_KM).to_degrees();
    let lon_span = (distance_km / (EARTH_RADIUS_KM * center_lat.to_radians().cos())).to_degrees();
    Ok((lat_span, lon_span))
}

/// Span a 256-pixel-tile camera needs to display `zoom` at `center_lat`.
///
/// Used to center the camera on a single location at a fixed zoom.
///
/// # Returns
///
/// `(lat_span, lon_span)` in degrees.
pub fn camera_span_for_zoom(zoom: u8, view: ViewSize, center_lat: f64) -> (f64, f64) {
    let lon_deg_per_point = 360.0 / (CAMERA_TILE_SIZE * 2f64.powi(zoom as i32));
    let lat_deg_per_point = lon_deg_per_point / center_lat.to_radians().cos();
    (
        view.height * lat_deg_per_point,
        view.width * lon_deg_per_point,
    )
}

fn validate_span(axis: &'static str, value: f64) -> Result<(), GeoError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeoError::InvalidSpan { axis, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEW: ViewSize = ViewSize::new(390.0, 600.0);

    #[test]
    fn test_fold_heading() {
        assert_eq!(fold_heading(0.0), 0.0);
        assert_eq!(fold_heading(45.0), 45.0);
        assert_eq!(fold_heading(90.0), 90.0);
        assert_eq!(fold_heading(135.0), 45.0);
        assert_eq!(fold_heading(180.0), 0.0);
        assert_eq!(fold_heading(270.0), 90.0);
        assert_eq!(fold_heading(300.0), 60.0);
        assert_eq!(fold_heading(360.0), 0.0);
        assert_eq!(fold_heading(-30.0), 30.0);
        assert_eq!(fold_heading(-1e-20), 0.0);
    }

    #[test]
    fn test_zoom_north_up() {
        let (zoom, span) = zoom_and_span(0.0, 0.01, 0.01, VIEW).unwrap();
        assert!((span - 0.01).abs() < 1e-12);
        // log2(360 * 390 / 128 / 0.01) = log2(109687.5)
        assert!((zoom - 109_687.5f64.log2()).abs() < 1e-9);
        assert_eq!(zoom.round(), 17.0);
    }

    #[test]
    fn test_zoom_rotated_straightens_span() {
        let (_, span) = zoom_and_span(90.0, 0.01, 0.01, VIEW).unwrap();
        // At 90° the visible longitude span runs along the view height
        assert!((span - 390.0 * 0.01 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_rejects_bad_input() {
        assert!(matches!(
            zoom_and_span(0.0, 0.0, 0.01, VIEW),
            Err(GeoError::InvalidSpan { axis: "latitude", .. })
        ));
        assert!(matches!(
            zoom_and_span(0.0, 0.01, -0.01, VIEW),
            Err(GeoError::InvalidSpan { axis: "longitude", .. })
        ));
        assert!(zoom_and_span(f64::NAN, 0.01, 0.01, VIEW).is_err());
        assert!(zoom_and_span(0.0, 0.01, 0.01, ViewSize::new(0.0, 600.0)).is_err());
    }

    #[test]
    fn test_span_for_zoom_inverts_zoom() {
        let span = span_for_zoom(15, VIEW.width);
        let (zoom, _) = zoom_and_span(0.0, span, span, VIEW).unwrap();
        assert!((zoom - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_lat_lon_span_for_distance() {
        let (lat, lon) = lat_lon_span_for_distance(60.0, 10.0).unwrap();
        let expected_lat = 10.0 / EARTH_RADIUS_KM * 180.0 / std::f64::consts::PI;
        assert!((lat - expected_lat).abs() < 1e-12);
        // cos(60°) = 0.5 so longitude span doubles
        assert!((lon - 2.0 * expected_lat).abs() < 1e-9);

        assert!(lat_lon_span_for_distance(90.0, 1.0).is_err());
        assert!(lat_lon_span_for_distance(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_camera_span_for_zoom() {
        let (lat, lon) = camera_span_for_zoom(0, ViewSize::new(256.0, 256.0), 0.0);
        assert!((lon - 360.0).abs() < 1e-9);
        assert!((lat - 360.0).abs() < 1e-9);

        let (_, lon20) = camera_span_for_zoom(20, VIEW, 38.0);
        assert!((lon20 - 390.0 * 360.0 / (256.0 * 1_048_576.0)).abs() < 1e-15);
    }

    proptest! {
        #[test]
        fn prop_heading_fold_invariance(
            heading in 0.0..90.0f64,
            lat_span in 0.0001..10.0f64,
            lon_span in 0.0001..10.0f64,
        ) {
            let (base_zoom, base_span) = zoom_and_span(heading, lat_span, lon_span, VIEW).unwrap();
            for variant in [heading + 180.0, -heading, 360.0 - heading, heading - 180.0] {
                let (zoom, span) = zoom_and_span(variant, lat_span, lon_span, VIEW).unwrap();
                prop_assert!((zoom - base_zoom).abs() < 1e-9);
                prop_assert!((span - base_span).abs() <= base_span * 1e-9);
            }
        }

        #[test]
        fn prop_fold_in_quadrant(heading in -1000.0..1000.0f64) {
            let folded = fold_heading(heading);
            prop_assert!((0.0..=90.0).contains(&folded));
        }
    }
}
