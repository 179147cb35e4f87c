//! Runner configuration (`glass.toml`).
//!
//! ```toml
//! [run]
//! cycles = 3
//!
//! [log]
//! filter = "glass_kernel=debug,info"
//! ```
//!
//! Every key is optional. Command-line flags take precedence.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "glass.toml";
pub const DEFAULT_CYCLES: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("run.cycles must be at least 1")]
    ZeroCycles,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    #[serde(default)]
    pub run: RunSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    #[serde(default = "default_cycles")]
    pub cycles: u32,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
        }
    }
}

fn default_cycles() -> u32 {
    DEFAULT_CYCLES
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    #[serde(default)]
    pub filter: Option<String>,
}

impl RunnerConfig {
    pub fn from_toml_str(text: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.to_string(),
            source,
        })?;
        if config.run.cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Load the explicitly requested config, or `./glass.toml` if it exists,
    /// or fall back to defaults.
    pub fn resolve(requested: Option<&str>) -> Result<Self, ConfigError> {
        match requested {
            Some(path) => Self::load(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
