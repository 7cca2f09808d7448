//! Degree ↔ local-meter projection.

use geo_types::Coord;

/// Meters per degree of latitude, treated as constant.
pub const METERS_PER_DEGREE_LAT: f64 = 111_132.0;

/// Meters per degree of longitude at the equator; scaled by cos(latitude).
pub const METERS_PER_DEGREE_LON_EQUATOR: f64 = 111_320.0;

/// A local tangent-plane projection anchored at a reference latitude.
///
/// Out-of-range latitudes are not rejected; accuracy just degrades silently,
/// collapsing entirely at the poles where cos(latitude) reaches zero.
#[derive(Debug, Clone, Copy)]
pub struct LocalProjection {
    meters_per_degree_lon: f64,
}

impl LocalProjection {
    /// Build a projection scaled for the given reference latitude in degrees.
    pub fn at_latitude(reference_lat: f64) -> Self {
        Self {
            meters_per_degree_lon: METERS_PER_DEGREE_LON_EQUATOR * reference_lat.to_radians().cos(),
        }
    }

    /// Project a degree coordinate onto the local meter plane.
    pub fn to_meters(&self, point: Coord<f64>) -> (f64, f64) {
        (
            point.x * self.meters_per_degree_lon,
            point.y * METERS_PER_DEGREE_LAT,
        )
    }

    /// Map a local meter-plane position back to degrees.
    pub fn to_degrees(&self, x: f64, y: f64) -> Coord<f64> {
        Coord {
            x: x / self.meters_per_degree_lon,
            y: y / METERS_PER_DEGREE_LAT,
        }
    }

    pub fn meters_per_degree_lon(&self) -> f64 {
        self.meters_per_degree_lon
    }
}
