//! Geographic to pixel projection (spherical Mercator)

use crate::config::ProjectionConfig;
use std::f64::consts::FRAC_PI_4;

/// Mercator is unbounded at the poles; clamp like web maps do
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// A position on the drawing surface, in pixels
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// True if a coordinate pair can be projected meaningfully
pub fn is_valid_coordinate(lon: f64, lat: f64) -> bool {
    lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat)
}

#[inline]
fn mercator_y(lat: f64) -> f64 {
    let phi = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    (FRAC_PI_4 + phi / 2.0).tan().ln()
}

/// Stateless projector: same config and input always give the same pixel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoProjector {
    config: ProjectionConfig,
    center_y: f64,
}

impl GeoProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            center_y: mercator_y(config.center.1),
            config,
        }
    }

    /// Project (lon, lat) in degrees into drawable-area pixels.
    /// Callers validate with [`is_valid_coordinate`] first; NaN in gives NaN out.
    pub fn project(&self, lon: f64, lat: f64) -> Point {
        let k = self.config.scale;
        let (tx, ty) = self.config.translate;
        let x = tx + k * (lon - self.config.center.0).to_radians();
        let y = ty - k * (mercator_y(lat) - self.center_y);
        Point::new(x, y)
    }
}
