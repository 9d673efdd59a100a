// src/config.rs

use std::fs;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::error::{IoError, Result};

// Endpoint defaults
pub const DEFAULT_BASE_URL: &str = "http://www.faforever.com";
pub const DEFAULT_LADDER_PATH: &str = "/faf/leaderboard/ladder1v1.php";

// HTTP defaults
pub const CONNECT_TIMEOUT_MS: u64 = 5_000;
pub const TIMEOUT_MS: u64 = 10_000;
pub const USER_AGENT: &str = concat!("ladder_scrape/", env!("CARGO_PKG_VERSION"));

/// Endpoint location and HTTP knobs. Compiled defaults work out of the box;
/// a JSON file can override any subset of fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub ladder_path: String,
    pub connect_timeout_ms: u64,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: s!(DEFAULT_BASE_URL),
            ladder_path: s!(DEFAULT_LADDER_PATH),
            connect_timeout_ms: CONNECT_TIMEOUT_MS,
            timeout_ms: TIMEOUT_MS,
            user_agent: s!(USER_AGENT),
        }
    }
}

impl ScrapeConfig {
    /// Load overrides from a JSON file; absent keys keep their defaults.
    pub fn from_file(
        path: impl AsRef<Path>,
    ) -> std::result::Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Compose the ladder endpoint from base URL and path.
    pub fn ladder_url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url).map_err(IoError::from)?;
        let url = base.join(&self.ladder_path).map_err(IoError::from)?;
        Ok(url)
    }
}
