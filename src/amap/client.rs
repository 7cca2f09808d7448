//! Shared HTTP plumbing for the AMap adapters.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::config::AmapConfig;
use crate::error::ProviderError;

/// HTTP client for the AMap REST API.
///
/// Cheap to clone; the underlying connection pool is shared. The API key is
/// bound at construction (never read from the environment at call time) and
/// attached to every request.
#[derive(Clone)]
pub struct AmapClient {
    http: Client,
    base: Url,
    key: String,
}

impl AmapClient {
    pub fn new(config: &AmapConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).context("Invalid AMap base URL")?;
        let http = Client::builder()
            .user_agent("skyfence/0.1 (drone route planner)")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base,
            key: config.key.clone(),
        })
    }

    /// Issue a GET against an endpoint path relative to the base URL and
    /// decode the JSON body. Provider-level `status` handling is left to the
    /// per-endpoint adapters.
    pub(crate) async fn get_json(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, ProviderError> {
        let url = self
            .base
            .join(path)
            .map_err(|e| ProviderError::Malformed(format!("bad endpoint path {path:?}: {e}")))?;

        let response = self
            .http
            .get(url)
            .query(&[("key", self.key.as_str()), ("output", "JSON")])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}
