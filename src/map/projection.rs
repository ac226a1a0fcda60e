//! Spherical Web Mercator (EPSG:3857) conversions.
//!
//! The map widget keeps its camera in projected meters; the store speaks
//! WGS84 degrees. These are the only two functions that cross that line.

use std::f64::consts::PI;

pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the width of the projected world, in meters.
pub const HALF_WORLD: f64 = PI * EARTH_RADIUS;

/// Latitude at which the projected square ends.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// A point in projected meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
}

impl Projected {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Degrees to projected meters. Latitude is clamped to the Mercator limit.
pub fn from_lon_lat(longitude: f64, latitude: f64) -> Projected {
    let latitude = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = EARTH_RADIUS * longitude.to_radians();
    let y = EARTH_RADIUS * (PI / 4.0 + latitude.to_radians() / 2.0).tan().ln();
    Projected::new(x, y)
}

/// Projected meters to `(longitude, latitude)` in degrees.
pub fn to_lon_lat(point: Projected) -> (f64, f64) {
    let longitude = (point.x / EARTH_RADIUS).to_degrees();
    let latitude = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
    (longitude, latitude)
}

/// Wrap a projected x back into the world, so panning across the
/// antimeridian keeps longitudes in `[-180, 180)`.
pub fn wrap_x(x: f64) -> f64 {
    let width = 2.0 * HALF_WORLD;
    (x + HALF_WORLD).rem_euclid(width) - HALF_WORLD
}
