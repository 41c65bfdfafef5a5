use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shared store file read by both the app and the widget process.
    #[serde(default = "default_shared_path")]
    pub shared_path: String,

    /// Where the enrolled anonymous identity is persisted.
    #[serde(default = "default_identity_path")]
    pub identity_path: String,

    /// Document API endpoint and key. Absent means the remote store is
    /// not configured; the app still runs from the local cache.
    pub api_base_url: Option<String>,
    pub api_key: Option<String>,
}

fn data_dir() -> PathBuf {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("astroline");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn default_shared_path() -> String {
    data_dir().join("shared.json").to_string_lossy().to_string()
}

fn default_identity_path() -> String {
    data_dir()
        .join("identity.json")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shared_path: default_shared_path(),
            identity_path: default_identity_path(),
            api_base_url: None,
            api_key: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("astroline")
            .join("config.toml")
    }
}
