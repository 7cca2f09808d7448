//! KML writer: waypoint placemarks plus no-fly polygons.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Waypoint, Zone};

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
"#;

const FOOTER: &str = "</Document>\n</kml>\n";

/// Write waypoints and no-fly zones as a KML document.
pub fn export_kml(waypoints: &[Waypoint], zones: &[Zone], path: &Path) -> Result<()> {
    let mut doc = String::from(HEADER);

    for (i, wp) in waypoints.iter().enumerate() {
        let _ = writeln!(doc, "  <Placemark><name>wp{i}</name><Point><coordinates>");
        match wp.alt {
            Some(alt) => {
                let _ = writeln!(doc, "    {},{},{}", wp.lon, wp.lat, alt);
            }
            None => {
                let _ = writeln!(doc, "    {},{}", wp.lon, wp.lat);
            }
        }
        let _ = writeln!(doc, "  </coordinates></Point></Placemark>");
    }

    for (i, zone) in zones.iter().enumerate() {
        let _ = writeln!(
            doc,
            "  <Placemark><name>no-fly {i}</name><Polygon><outerBoundaryIs>\
             <LinearRing><coordinates>"
        );
        for point in &zone.exterior().0 {
            let _ = writeln!(doc, "    {},{}", point.x, point.y);
        }
        let _ = writeln!(
            doc,
            "  </coordinates></LinearRing></outerBoundaryIs></Polygon></Placemark>"
        );
    }

    doc.push_str(FOOTER);
    fs::write(path, doc).with_context(|| format!("Failed to write KML to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::circle_buffer;
    use geo_types::Coord;

    #[test]
    fn test_kml_document_structure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.kml");

        let waypoints = vec![
            Waypoint::with_altitude(116.0, 40.0, 120.0),
            Waypoint::new(116.1, 40.1),
        ];
        let zones = vec![circle_buffer(Coord { x: 116.05, y: 40.05 }, 500.0, 8)];

        export_kml(&waypoints, &zones, &path).unwrap();

        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.starts_with("<?xml"));
        assert!(doc.contains("<name>wp0</name>"));
        assert!(doc.contains("116,40,120"));
        assert!(doc.contains("<name>no-fly 0</name>"));
        assert!(doc.contains("<LinearRing>"));
        assert!(doc.trim_end().ends_with("</kml>"));
    }
}
