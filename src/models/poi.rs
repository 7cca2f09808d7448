//! Point-of-interest record from AMap place search.

use geo_types::Coord;
use serde::Deserialize;
use serde_json::Value;

use super::lenient_string;
use crate::geometry::polyline::parse_point;

/// One entry of a `place/text` search result.
///
/// AMap only guarantees `id`, `name` and `location`; shape data shows up on a
/// minority of POIs (roads, rivers, some scenic areas), either directly under
/// `polyline` or inside the `biz_ext` extension object. Absent string fields
/// arrive as empty arrays, hence the lenient deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Poi {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Center point as a raw `"lon,lat"` string.
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,

    /// Shape payload (`;`-separated points), present on road/river POIs.
    #[serde(default, deserialize_with = "lenient_string")]
    pub polyline: Option<String>,

    /// Provider extension object, probed for the same shape fields.
    #[serde(default)]
    pub biz_ext: Value,
}

impl Poi {
    /// The raw boundary payload carried directly by the search result, if any.
    pub fn boundary_payload(&self) -> Option<&str> {
        self.polyline.as_deref().or_else(|| {
            self.biz_ext
                .get("polyline")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
    }

    /// The POI's center point, when the location string parses.
    pub fn location_point(&self) -> Option<Coord<f64>> {
        parse_point(self.location.as_deref()?)
    }
}
