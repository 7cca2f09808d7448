//! GPX track writer.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint as GpxWaypoint};

use crate::models::Waypoint;

/// Write the waypoint sequence as a single GPX track segment.
pub fn export_gpx(waypoints: &[Waypoint], path: &Path) -> Result<()> {
    let mut segment = TrackSegment { points: Vec::new() };
    for wp in waypoints {
        let mut point = GpxWaypoint::new(Point::new(wp.lon, wp.lat));
        point.elevation = wp.alt;
        segment.points.push(point);
    }

    let track = Track {
        segments: vec![segment],
        ..Track::default()
    };

    let document = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("skyfence".to_string()),
        tracks: vec![track],
        ..Gpx::default()
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create GPX file {}", path.display()))?;
    gpx::write(&document, BufWriter::new(file)).context("Failed to serialize GPX")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpx_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.gpx");

        let waypoints = vec![
            Waypoint::with_altitude(116.0, 40.0, 120.0),
            Waypoint::with_altitude(116.1, 40.1, 120.0),
        ];
        export_gpx(&waypoints, &path).unwrap();

        let parsed = gpx::read(std::io::BufReader::new(File::open(&path).unwrap())).unwrap();
        assert_eq!(parsed.tracks.len(), 1);
        let points = &parsed.tracks[0].segments[0].points;
        assert_eq!(points.len(), 2);
        assert!((points[0].point().x() - 116.0).abs() < 1e-9);
        assert_eq!(points[0].elevation, Some(120.0));
    }
}
