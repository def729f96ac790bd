//! Configuration management for FlickTUI
//!
//! Handles config file loading/saving and API key resolution.
//! Config is stored at ~/.config/flicktui/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default embed host for the player
pub const DEFAULT_EMBED_BASE_URL: &str = "https://vidlink.pro";

/// Environment variable checked before the config file
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No TMDB API key: set TMDB_API_KEY or tmdb_api_key in {0}")]
    MissingApiKey(String),
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 API key
    pub tmdb_api_key: Option<String>,
    /// Embed player host, e.g. https://vidlink.pro
    pub embed_base_url: String,
    /// Quiet period before a typed query is searched
    pub debounce_ms: u64,
    /// Number of suggestions kept from a search
    pub suggestion_limit: usize,
    /// External program to open player URLs with (default: system browser)
    pub player_command: Option<String>,
    /// Extra arguments placed before the URL
    pub player_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            embed_base_url: DEFAULT_EMBED_BASE_URL.to_string(),
            debounce_ms: 250,
            suggestion_limit: 8,
            player_command: None,
            player_args: Vec::new(),
        }
    }
}

impl Config {
    /// Default config file path (~/.config/flicktui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("flicktui").join("config.toml"))
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring unreadable config");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load config from an explicit path. A missing file yields defaults;
    /// a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse TOML text
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Resolve the TMDB API key:
    /// 1. Environment variable TMDB_API_KEY
    /// 2. Key from config file
    pub fn api_key(&self) -> Result<String, ConfigError> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env: Option<String>) -> Result<String, ConfigError> {
        env.filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.tmdb_api_key
                    .clone()
                    .filter(|k| !k.trim().is_empty())
            })
            .ok_or_else(|| {
                let location = Self::path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "config.toml".to_string());
                ConfigError::MissingApiKey(location)
            })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
