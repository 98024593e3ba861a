//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/roomkit/config.toml` by default:
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [events]
//! disabled_types = ["m.typing"]
//! pretty = true
//! ```

use std::path::{Path, PathBuf};

use roomkit_core::TracingConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Configuration for the roomkit CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub logging: LoggingSettings,

    pub events: EventSettings,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    pub level: String,

    /// One of `pretty`, `compact` or `json`.
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Event handling settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Event types removed from the registry at startup; documents of these
    /// types fail to decode.
    pub disabled_types: Vec<String>,

    /// Pretty-print emitted JSON.
    pub pretty: bool,
}

impl CliConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| ClientError::config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roomkit")
    }

    /// Tracing settings for this configuration.
    pub fn tracing_config(&self) -> ClientResult<TracingConfig> {
        Ok(TracingConfig::from_settings(
            &self.logging.level,
            &self.logging.format,
        )?)
    }

    /// Checks values serde cannot check on its own.
    pub fn validate(&self) -> ClientResult<()> {
        self.tracing_config()?;
        if self.events.disabled_types.iter().any(|tag| tag.trim().is_empty()) {
            return Err(ClientError::config(
                "events.disabled_types must not contain empty type names",
            ));
        }
        Ok(())
    }
}
