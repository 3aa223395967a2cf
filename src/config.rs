use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::clock::ClockTime;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("basket")
        .join(CONFIG_FILE)
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ReflectionConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.anthropic.com/v1/messages".into(),
            model: "claude-haiku-4-5-20251001".into(),
            max_tokens: 400,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct BasketConfig {
    pub debug_logging: bool,
    /// Picker value when no time has been chosen yet, `HH:MM`.
    pub default_start: Option<String>,
    pub reflection: ReflectionConfig,
}

impl BasketConfig {
    /// Read the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The configured default start, falling back to 09:00 when unset or
    /// unparseable.
    pub fn default_start(&self) -> ClockTime {
        self.default_start
            .as_deref()
            .and_then(|s| match ClockTime::parse(s) {
                Ok(t) => Some(t),
                Err(e) => {
                    log::warn!("Ignoring default_start: {}", e);
                    None
                }
            })
            .unwrap_or(ClockTime::DEFAULT_START)
    }
}
