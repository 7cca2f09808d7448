//! Mission CSV writer: one row per waypoint for ground-control import.

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Waypoint;

/// Write waypoints as `index,lat,lon,alt_m` rows. Waypoints without an
/// altitude are written at ground level.
pub fn export_mission(waypoints: &[Waypoint], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create mission file {}", path.display()))?;

    writer.write_record(["index", "lat", "lon", "alt_m"])?;
    for (i, wp) in waypoints.iter().enumerate() {
        writer.write_record([
            i.to_string(),
            wp.lat.to_string(),
            wp.lon.to_string(),
            wp.alt.unwrap_or(0.0).to_string(),
        ])?;
    }
    writer.flush().context("Failed to flush mission file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mission_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.csv");

        let waypoints = vec![
            Waypoint::with_altitude(116.0, 40.0, 120.0),
            Waypoint::new(116.1, 40.1),
        ];
        export_mission(&waypoints, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "index,lat,lon,alt_m");
        assert_eq!(lines[1], "0,40,116,120");
        assert_eq!(lines[2], "1,40.1,116.1,0");
    }
}
