//! Buffer polygon synthesis around points and polylines.

use std::f64::consts::TAU;

use geo_types::{Coord, LineString, Polygon};

use super::projection::{LocalProjection, METERS_PER_DEGREE_LAT};
use crate::models::Zone;

/// Vertex count used when no explicit segment count is requested.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 24;

/// Floor applied to non-positive radii instead of rejecting the call.
const MIN_RADIUS_M: f64 = 0.01;

/// Approximate a circle of `radius_m` meters around `center` as a closed
/// polygon with `segments` vertices (clamped to at least 3) plus the closing
/// vertex. Non-positive radii are clamped to a centimeter floor.
pub fn circle_buffer(center: Coord<f64>, radius_m: f64, segments: usize) -> Zone {
    let radius_m = radius_m.max(MIN_RADIUS_M);
    let segments = segments.max(3);

    let projection = LocalProjection::at_latitude(center.y);
    let r_lon = radius_m / projection.meters_per_degree_lon();
    let r_lat = radius_m / METERS_PER_DEGREE_LAT;

    let mut ring = Vec::with_capacity(segments + 1);
    for i in 0..segments {
        let angle = TAU * i as f64 / segments as f64;
        ring.push(Coord {
            x: center.x + angle.cos() * r_lon,
            y: center.y + angle.sin() * r_lat,
        });
    }
    ring.push(ring[0]);

    Polygon::new(LineString::from(ring), vec![])
}

/// Build a corridor polygon around a polyline by offsetting both sides by
/// `buffer_m` meters in the local meter plane and closing the loop.
///
/// A single-point input degenerates to [`circle_buffer`]; an empty input has
/// no meaningful shape and yields `None`.
///
/// Known limitation: the sides are plain perpendicular offsets with no miter
/// or cap correction, so they can cross at sharp reversals in the polyline
/// and produce a self-intersecting ring.
pub fn corridor_buffer(polyline: &[Coord<f64>], buffer_m: f64) -> Option<Zone> {
    let (first, rest) = polyline.split_first()?;
    if rest.is_empty() {
        return Some(circle_buffer(*first, buffer_m, DEFAULT_CIRCLE_SEGMENTS));
    }

    let mean_lat = polyline.iter().map(|p| p.y).sum::<f64>() / polyline.len() as f64;
    let projection = LocalProjection::at_latitude(mean_lat);
    let xy: Vec<(f64, f64)> = polyline.iter().map(|p| projection.to_meters(*p)).collect();

    let last = xy.len() - 1;
    let mut left = Vec::with_capacity(xy.len());
    let mut right = Vec::with_capacity(xy.len());

    for i in 0..xy.len() {
        // Direction at this vertex: the adjacent segment at the endpoints,
        // the average of incoming and outgoing segments in between.
        let (vx, vy) = if i == 0 {
            (xy[1].0 - xy[0].0, xy[1].1 - xy[0].1)
        } else if i == last {
            (xy[last].0 - xy[last - 1].0, xy[last].1 - xy[last - 1].1)
        } else {
            (
                (xy[i].0 - xy[i - 1].0 + xy[i + 1].0 - xy[i].0) * 0.5,
                (xy[i].1 - xy[i - 1].1 + xy[i + 1].1 - xy[i].1) * 0.5,
            )
        };

        // 90° rotation gives the outward normal; duplicate adjacent points
        // leave a zero direction and so a zero normal.
        let norm = vx.hypot(vy);
        let (nx, ny) = if norm == 0.0 {
            (0.0, 0.0)
        } else {
            (-vy / norm, vx / norm)
        };

        let (x, y) = xy[i];
        left.push((x + nx * buffer_m, y + ny * buffer_m));
        right.push((x - nx * buffer_m, y - ny * buffer_m));
    }

    let mut ring: Vec<Coord<f64>> = left
        .into_iter()
        .chain(right.into_iter().rev())
        .map(|(x, y)| projection.to_degrees(x, y))
        .collect();
    if ring.first() != ring.last() {
        ring.push(ring[0]);
    }

    Some(Polygon::new(LineString::from(ring), vec![]))
}
