//! Obstacle polygon and waypoint types.

use geo_types::Polygon;

/// A single no-fly obstacle polygon: one exterior ring, no holes.
/// Coordinates are degrees, `x` = longitude, `y` = latitude.
pub type Zone = Polygon<f64>;

/// All obstacle polygons attributed to one resolved place name, in the order
/// the resolution strategies discovered them. The order carries no spatial
/// meaning. An empty set means "nothing resolved", never an error.
pub type ZoneSet = Vec<Zone>;

/// A mission waypoint handed to the export writers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub lon: f64,
    pub lat: f64,
    /// Flight altitude in meters, when the planner assigned one.
    pub alt: Option<f64>,
}

impl Waypoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            alt: None,
        }
    }

    pub fn with_altitude(lon: f64, lat: f64, alt: f64) -> Self {
        Self {
            lon,
            lat,
            alt: Some(alt),
        }
    }
}
