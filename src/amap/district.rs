//! Administrative district lookup via `config/district`.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::AmapClient;
use crate::error::ProviderError;
use crate::models::District;
use crate::resolver::DistrictSource;

#[derive(Debug, Deserialize)]
struct DistrictResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    districts: Vec<District>,
}

fn parse_district_response(body: Value) -> Result<Option<District>, ProviderError> {
    let response: DistrictResponse = serde_json::from_value(body)
        .map_err(|e| ProviderError::Malformed(format!("district response: {e}")))?;

    if response.status != "1" || response.districts.is_empty() {
        debug!(
            "district miss (status {}, {})",
            response.status, response.info
        );
        return Ok(None);
    }

    // Only the top match is used; further entries are homonyms in other
    // provinces.
    Ok(response.districts.into_iter().next())
}

impl DistrictSource for AmapClient {
    async fn fetch_district(
        &self,
        keywords: &str,
        subdistrict: u8,
    ) -> Result<Option<District>, ProviderError> {
        let body = self
            .get_json(
                "config/district",
                &[
                    ("keywords", keywords.to_string()),
                    ("subdistrict", subdistrict.to_string()),
                    ("extensions", "all".to_string()),
                ],
            )
            .await?;
        parse_district_response(body)
    }
}
