//! Map regions and the requests derived from them.
//!
//! A [`CameraRegion`] is what the map widget reports: a center, the visible
//! angular span, a heading, and the view's size in points. [`MapRegion`]
//! normalizes that into the API's projection, with an integer zoom and a
//! north-up bounding box. [`ViewportRequest`] is the zoom and box pair that
//! is compared, cached, and sent over the wire.
//!
//! # Example
//!
//! ```ignore
//! use fruitwalk::geo::{Coordinate, ViewSize};
//! use fruitwalk::region::{CameraRegion, MapRegion};
//!
//! let camera = CameraRegion::new(
//!     Coordinate::new(38.0, -122.0),
//!     0.01,
//!     0.01,
//!     0.0,
//!     ViewSize::new(390.0, 600.0),
//! );
//! let region = MapRegion::from_camera(&camera)?;
//! assert_eq!(region.zoom, 17);
//! ```

mod request;

pub use request::ViewportRequest;

use crate::geo::{
    camera_span_for_zoom, zoom_and_span, BoundingBox, Coordinate, GeoError, ViewSize, MAX_ZOOM,
};

/// Visible region as reported by a map camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRegion {
    pub center: Coordinate,
    /// Visible latitude span in degrees
    pub lat_span: f64,
    /// Visible longitude span in degrees, measured along the rotated view
    pub lon_span: f64,
    /// Camera heading in degrees clockwise from north
    pub heading: f64,
    pub view: ViewSize,
}

impl CameraRegion {
    pub fn new(
        center: Coordinate,
        lat_span: f64,
        lon_span: f64,
        heading: f64,
        view: ViewSize,
    ) -> Self {
        Self {
            center,
            lat_span,
            lon_span,
            heading,
            view,
        }
    }

    /// A north-up camera centered on `center` showing `zoom`.
    ///
    /// Spans are computed for 256-point map tiles, matching how map widgets
    /// size their camera when asked to focus on a single point.
    pub fn centered_on(center: Coordinate, zoom: u8, view: ViewSize) -> Self {
        let (lat_span, lon_span) = camera_span_for_zoom(zoom, view, center.lat);
        Self::new(center, lat_span, lon_span, 0.0, view)
    }

    /// A north-up camera whose sides cover `distance_km`.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative distance or a polar center.
    pub fn around(center: Coordinate, distance_km: f64, view: ViewSize) -> Result<Self, GeoError> {
        let bounds = BoundingBox::from_center_and_radius(center, distance_km)?;
        Ok(Self::new(
            center,
            bounds.height(),
            bounds.width(),
            0.0,
            view,
        ))
    }
}

/// A camera region normalized to the API's projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center: Coordinate,
    /// Discrete zoom level, rounded and clamped to `0..=MAX_ZOOM`
    pub zoom: u8,
    pub lat_span: f64,
    /// North-up longitude span
    pub lon_span: f64,
    pub view: ViewSize,
    pub bounds: BoundingBox,
}

impl MapRegion {
    /// Normalizes a camera region.
    ///
    /// # Errors
    ///
    /// Returns an error if the center is out of range, a span is not positive,
    /// the heading is not finite, or the view is empty. No state is touched
    /// when this fails.
    pub fn from_camera(camera: &CameraRegion) -> Result<Self, GeoError> {
        camera.center.validate()?;
        let (zoom, straightened) =
            zoom_and_span(camera.heading, camera.lat_span, camera.lon_span, camera.view)?;

        Ok(Self {
            center: camera.center,
            zoom: discrete_zoom(zoom),
            lat_span: camera.lat_span,
            lon_span: straightened,
            view: camera.view,
            bounds: BoundingBox::from_center_and_span(
                camera.center,
                camera.lat_span,
                straightened,
            ),
        })
    }

    /// Returns this region scaled about its center by `multiplier`.
    ///
    /// Both spans and the view grow linearly. The zoom is kept, so the
    /// expanded region still keys the same cache slot.
    pub fn expanded(&self, multiplier: f64) -> Self {
        let lat_span = self.lat_span * multiplier;
        let lon_span = self.lon_span * multiplier;
        Self {
            center: self.center,
            zoom: self.zoom,
            lat_span,
            lon_span,
            view: self.view.scaled(multiplier),
            bounds: BoundingBox::from_center_and_span(self.center, lat_span, lon_span),
        }
    }

    /// The request that fetches this region.
    pub fn request(&self) -> ViewportRequest {
        ViewportRequest::new(self.zoom, self.bounds)
    }
}

fn discrete_zoom(zoom: f64) -> u8 {
    zoom.round().clamp(0.0, MAX_ZOOM as f64) as u8
}
