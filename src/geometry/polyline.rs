//! Parsers for AMap's delimited coordinate payloads.
//!
//! Grammar: a payload is zero or more rings separated by `|`; a ring is zero
//! or more points separated by `;`; a point is `lon,lat` with two decimal
//! fields. Malformed point tokens are dropped silently and parsing continues.

use geo_types::{Coord, LineString, Polygon};

use crate::models::Zone;

/// Parse a single `"lon,lat"` token. Exactly two numeric fields, or `None`.
pub fn parse_point(token: &str) -> Option<Coord<f64>> {
    let mut fields = token.trim().split(',');
    let lon: f64 = fields.next()?.trim().parse().ok()?;
    let lat: f64 = fields.next()?.trim().parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Coord { x: lon, y: lat })
}

/// Parse a `;`-separated point sequence, dropping malformed tokens.
///
/// Road and route polylines are accepted with as few as one point; an empty
/// payload yields an empty sequence.
pub fn parse_polyline(payload: &str) -> Vec<Coord<f64>> {
    payload
        .split(';')
        .filter(|token| !token.trim().is_empty())
        .filter_map(parse_point)
        .collect()
}

/// Parse one ring payload into a closed polygon.
///
/// Rings need at least 3 surviving points; anything less is discarded. The
/// ring is closed by repeating the first point when the payload left it open.
pub fn parse_ring(payload: &str) -> Option<Zone> {
    let mut points = parse_polyline(payload);
    if points.len() < 3 {
        return None;
    }
    if points.first() != points.last() {
        points.push(points[0]);
    }
    Some(Polygon::new(LineString::from(points), vec![]))
}

/// Parse a `|`-separated multi-ring boundary payload, dropping degenerate
/// rings.
pub fn parse_rings(payload: &str) -> Vec<Zone> {
    payload.split('|').filter_map(parse_ring).collect()
}
