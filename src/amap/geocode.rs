//! Forward geocoding via `geocode/geo`.

use geo_types::Coord;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::AmapClient;
use crate::error::ProviderError;
use crate::geometry::polyline::parse_point;
use crate::models::lenient_string;
use crate::resolver::GeocodeSource;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    geocodes: Vec<GeocodeEntry>,
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    location: Option<String>,
}

/// Extract the first candidate's point. A rejected request, empty candidate
/// list, or malformed location string all collapse to "not found".
fn parse_geocode_response(body: Value) -> Result<Option<Coord<f64>>, ProviderError> {
    let response: GeocodeResponse = serde_json::from_value(body)
        .map_err(|e| ProviderError::Malformed(format!("geocode response: {e}")))?;

    if response.status != "1" || response.geocodes.is_empty() {
        debug!("geocode miss (status {}, {})", response.status, response.info);
        return Ok(None);
    }

    Ok(response.geocodes[0]
        .location
        .as_deref()
        .and_then(parse_point))
}

impl GeocodeSource for AmapClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, ProviderError> {
        let body = self
            .get_json("geocode/geo", &[("address", address.to_string())])
            .await?;
        parse_geocode_response(body)
    }
}
