//! Keyword POI search via `place/text` and detail lookup via `place/detail`.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::AmapClient;
use crate::error::ProviderError;
use crate::models::Poi;
use crate::resolver::PlaceSource;

#[derive(Debug, Deserialize)]
struct PlaceTextResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    pois: Vec<Poi>,
}

fn parse_search_response(body: Value) -> Result<Vec<Poi>, ProviderError> {
    let response: PlaceTextResponse = serde_json::from_value(body)
        .map_err(|e| ProviderError::Malformed(format!("place/text response: {e}")))?;

    if response.status != "1" {
        debug!(
            "place search miss (status {}, {})",
            response.status, response.info
        );
        return Ok(Vec::new());
    }

    Ok(response.pois)
}

impl PlaceSource for AmapClient {
    async fn search_places(&self, keywords: &str, limit: u32) -> Result<Vec<Poi>, ProviderError> {
        let body = self
            .get_json(
                "place/text",
                &[
                    ("keywords", keywords.to_string()),
                    ("extensions", "all".to_string()),
                    ("offset", limit.to_string()),
                    ("page", "1".to_string()),
                ],
            )
            .await?;
        parse_search_response(body)
    }

    async fn place_detail(&self, id: &str) -> Result<Option<Value>, ProviderError> {
        let body = self
            .get_json("place/detail", &[("id", id.to_string())])
            .await?;

        if body.get("status").and_then(Value::as_str) != Some("1") {
            return Ok(None);
        }

        // The detail document is deliberately kept as a raw value; the
        // orchestration layer probes it for whichever boundary field this
        // POI class happens to carry.
        Ok(body.get("poi").filter(|poi| !poi.is_null()).cloned())
    }
}
