use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RealmsError, RealmsResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub gestures: GestureConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_results: usize,
    /// Multiplier applied to URL scores before they compete with title scores.
    pub url_weight: f64,
    pub placeholder_title: String,
    /// Favicon service URL; `{domain}` is replaced with the tab's host.
    pub favicon_service: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub min_delta_x: f64,
    pub max_vertical_ratio: f64,
    pub throttle_ms: u64,
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub snapshot_path: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            url_weight: 0.8,
            placeholder_title: "New Tab".to_string(),
            favicon_service: "https://www.google.com/s2/favicons?domain={domain}&sz=32"
                .to_string(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_delta_x: 3.0,
            max_vertical_ratio: 2.0,
            throttle_ms: 16,
            channel: "swipe-wheel".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "~/.config/realms/state.json".to_string(),
        }
    }
}

impl SessionConfig {
    /// Snapshot path with `~` expanded
    pub fn resolved_snapshot_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.snapshot_path).into_owned())
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("realms")
            .join("config.toml")
    }

    /// Load config from the default location, or return defaults if missing or broken
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// Load and validate config from a specific file
    pub fn load_from(path: &Path) -> RealmsResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.validate();
        Ok(config)
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        self.search.max_results = self.search.max_results.clamp(1, 50);
        if !self.search.url_weight.is_finite() {
            self.search.url_weight = SearchConfig::default().url_weight;
        }
        self.search.url_weight = self.search.url_weight.clamp(0.0, 1.0);
        self.gestures.min_delta_x = self.gestures.min_delta_x.max(0.0);
        self.gestures.max_vertical_ratio = self.gestures.max_vertical_ratio.max(0.0);
    }

    /// Save config to the default location
    pub fn save(&self) -> RealmsResult<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> RealmsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RealmsError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }
}
