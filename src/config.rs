//! Configuration management

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "en-US";

const CONFIG_FILE: &str = "config.json";
const KEY_FILE: &str = "api_key";
const LOG_FILE: &str = "tmdb-explorer.log";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// How long the error banner stays on screen.
    #[serde(default = "default_banner_secs")]
    pub banner_secs: u64,
}

fn default_api_base_url() -> String { DEFAULT_API_BASE_URL.to_string() }
fn default_image_base_url() -> String { DEFAULT_IMAGE_BASE_URL.to_string() }
fn default_language() -> String { DEFAULT_LANGUAGE.to_string() }
fn default_timeout() -> u64 { 15 }
fn default_banner_secs() -> u64 { 5 }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            request_timeout_secs: default_timeout(),
            banner_secs: default_banner_secs(),
        }
    }
}

impl AppConfig {
    /// Load the config file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Per-user locations for the config file, the stored key and the log.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Result<Self, ConfigError> {
        let dirs = directories::ProjectDirs::from("org", "tmdb-explorer", "tmdb-explorer")
            .ok_or(ConfigError::NoHomeDir)?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            cache_dir: dirs.cache_dir().to_path_buf(),
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn key_file(&self) -> PathBuf {
        self.config_dir.join(KEY_FILE)
    }

    pub fn log_file(&self) -> PathBuf {
        self.cache_dir.join(LOG_FILE)
    }
}
