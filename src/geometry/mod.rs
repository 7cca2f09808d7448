//! Planar geometry for zone synthesis.
//!
//! Everything here works on a local tangent-plane approximation: degrees are
//! scaled to meters with latitude-dependent constants, offsets are computed
//! in the flat meter plane, and the result is scaled back. Good for spans of
//! a few tens of kilometers; not for polygons crossing large latitude ranges
//! or anywhere near the poles.

pub mod buffer;
pub mod polyline;
pub mod projection;

pub use buffer::{circle_buffer, corridor_buffer, DEFAULT_CIRCLE_SEGMENTS};
pub use polyline::{parse_point, parse_polyline, parse_ring, parse_rings};
pub use projection::LocalProjection;
