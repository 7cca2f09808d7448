//! Administrative district record from AMap `config/district`.

use serde::Deserialize;

use super::lenient_string;

/// One administrative area, possibly with nested sub-areas.
///
/// With `extensions=all` the boundary arrives as a `|`-separated list of
/// `;`-separated rings under `polyline` (older responses used `boundary`).
/// Large areas frequently carry no boundary at all and only enumerate their
/// children, which is what forces the recursive descent in the resolver.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct District {
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub polyline: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub boundary: Option<String>,

    /// Sub-districts, one level per requested `subdistrict` depth.
    #[serde(default, rename = "districts")]
    pub children: Vec<District>,
}

impl District {
    /// The raw multi-ring boundary payload, if the area carries one.
    pub fn boundary_payload(&self) -> Option<&str> {
        self.polyline.as_deref().or(self.boundary.as_deref())
    }
}
