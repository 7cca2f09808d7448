//! Output artifact writers for planned missions.
//!
//! Three formats, all overwrite-on-write: a KML document with the waypoints
//! and the no-fly polygons, a GPX track, and a simple mission CSV for ground
//! control software.

mod gpx;
mod kml;
mod mission;

pub use self::gpx::export_gpx;
pub use kml::export_kml;
pub use mission::export_mission;
