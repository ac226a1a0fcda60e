use serde::{Deserialize, Serialize};

use crate::store::mvi::SliceState;

/// Compile-time fallback viewport (central Moscow, country-level zoom).
///
/// The configured default in `[map]` normally overrides this; it is the
/// value a bare `ViewportState::default()` starts from.
pub const DEFAULT_VIEWPORT: ViewportState = ViewportState {
    longitude: 37.6173,
    latitude: 55.7558,
    zoom: 5.0,
};

/// Map center in WGS84 degrees plus zoom level.
///
/// Zoom limits belong to the map widget; the store passes any value
/// through, including non-finite ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        DEFAULT_VIEWPORT
    }
}

impl SliceState for ViewportState {
    fn same_as(&self, other: &Self) -> bool {
        self.is_identical(other)
    }
}

impl ViewportState {
    pub fn new(longitude: f64, latitude: f64, zoom: f64) -> Self {
        Self {
            longitude,
            latitude,
            zoom,
        }
    }

    /// Bitwise equality, so a NaN field compares equal to itself.
    pub fn is_identical(&self, other: &Self) -> bool {
        self.longitude.to_bits() == other.longitude.to_bits()
            && self.latitude.to_bits() == other.latitude.to_bits()
            && self.zoom.to_bits() == other.zoom.to_bits()
    }
}
