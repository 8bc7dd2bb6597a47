//! Application configuration management.
//!
//! Configuration is stored at `~/.config/pucktracker/config.json`. Every
//! field is optional; a missing file means all defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::api::DEFAULT_API_BASE_URL;

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "pucktracker";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Rendered page file name
const OUTPUT_FILE: &str = "standings.html";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Base URL of the statistics API, without `/standings`
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Where the rendered HTML page is written
    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn output_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.output_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(OUTPUT_FILE))
    }
}
