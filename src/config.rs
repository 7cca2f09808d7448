//! Client configuration.
//!
//! The AMap key is an explicit value threaded into [`crate::amap::AmapClient`]
//! at construction; nothing in the crate reads a global default at call time.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

fn default_base_url() -> String {
    "https://restapi.amap.com/v3/".to_string()
}

fn default_timeout_secs() -> u64 {
    8
}

fn default_buffer_meters() -> f64 {
    500.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct AmapConfig {
    /// AMap web-service API key.
    pub key: String,

    /// REST base URL, overridable for tests against a local stub server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fixed per-request timeout. There is no cancellation beyond this and no
    /// global deadline across a recursive district resolution.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Buffer radius applied when a name resolves only to a point.
    #[serde(default = "default_buffer_meters")]
    pub default_buffer_meters: f64,
}

impl AmapConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            default_buffer_meters: default_buffer_meters(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: AmapConfig = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Read the key from `AMAP_API_KEY` (or the legacy `AMAP_KEY`).
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("AMAP_API_KEY")
            .or_else(|_| std::env::var("AMAP_KEY"))
            .context("AMAP_API_KEY is not set")?;
        Ok(Self::new(key))
    }
}
