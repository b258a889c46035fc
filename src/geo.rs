//! Geographic and screen coordinate types shared by every layer.

use serde::{Deserialize, Serialize};

/// A point on the globe, both angles in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn from_degrees(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self::new(latitude_deg.to_radians(), longitude_deg.to_radians())
    }

    /// (latitude, longitude) in degrees.
    pub fn to_degrees(self) -> (f64, f64) {
        (self.latitude.to_degrees(), self.longitude.to_degrees())
    }
}

/// A position on the drawing surface in pixels, origin top-left, y down.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Drawing surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// (rows, cols) shape of a pixel buffer covering this viewport.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}

/// A point annotation placed on the map.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mark {
    pub screen: ScreenPoint,
    pub geo: GeoPoint,
    pub text: Option<String>,
}

/// An ordered polyline in geographic coordinates.
pub type Line = Vec<GeoPoint>;
