//! Core geographic value types.

use std::fmt;

use thiserror::Error;

/// Highest zoom level a map region can resolve to.
///
/// Web Mercator tile schemes stop being useful past this point, and the
/// Falling Fruit API accepts nothing higher.
pub const MAX_ZOOM: u8 = 22;

/// Latitude bounds in degrees.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Longitude bounds in degrees.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Errors raised while converting camera input into geographic values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude outside -90..=90 or not a finite number.
    #[error("Invalid latitude: {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),

    /// Longitude outside -180..=180 or not a finite number.
    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),

    /// A span that is zero, negative, or not finite.
    #[error("Invalid {axis} span: {value} (must be positive and finite)")]
    InvalidSpan { axis: &'static str, value: f64 },

    /// A view with no visible pixels.
    #[error("Invalid view size: {width}x{height} (both dimensions must be positive)")]
    InvalidViewSize { width: f64, height: f64 },

    /// Heading that is not a finite number.
    #[error("Invalid heading: {0}")]
    InvalidHeading(f64),

    /// Distance that is negative or not finite.
    #[error("Invalid distance: {0} km")]
    InvalidDistance(f64),
}

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate without validation.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate, rejecting out-of-range values.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        let coord = Self::new(lat, lng);
        coord.validate()?;
        Ok(coord)
    }

    /// Checks that both axes are finite and in range.
    pub fn validate(&self) -> Result<(), GeoError> {
        if !self.lat.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&self.lat) {
            return Err(GeoError::InvalidLatitude(self.lat));
        }
        if !self.lng.is_finite() || !(MIN_LON..=MAX_LON).contains(&self.lng) {
            return Err(GeoError::InvalidLongitude(self.lng));
        }
        Ok(())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Size of the map view in screen points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
}

impl ViewSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Checks that both dimensions are positive and finite.
    pub fn validate(&self) -> Result<(), GeoError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(GeoError::InvalidViewSize {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Returns the view scaled by `factor` on both axes.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}
