//! Hub configuration file
//!
//! ```toml
//! [admin]
//! is_admin = true
//!
//! [workflow]
//! upload_delay_ms = 2000
//! display_delay_ms = 1500
//! max_file_bytes = 10485760
//! allowed_types = ["pdf", "jpeg", "png"]
//!
//! [export]
//! output_dir = "downloads"
//! ```

use hub_model::AdminIdentity;
use hub_workflow::WorkflowConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory downloads are written to
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
        }
    }
}

/// Top-level configuration, every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Session identity, frozen at startup
    pub admin: AdminIdentity,
    /// Submission timings and file limits
    pub workflow: WorkflowConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl HubConfig {
    /// Parse TOML text
    ///
    /// # Errors
    /// Returns `toml::de::Error` on malformed input
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a config file
    ///
    /// # Errors
    /// - `ConfigError::Read` if the file cannot be read
    /// - `ConfigError::Parse` if it is not valid hub TOML
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, defaults otherwise
    ///
    /// # Errors
    /// Same as [`HubConfig::load`]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let config = Self::load(path)?;
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// With admin identity
    #[must_use]
    pub fn with_admin(mut self, admin: AdminIdentity) -> Self {
        self.admin = admin;
        self
    }

    /// With download directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export.output_dir = dir.into();
        self
    }
}
