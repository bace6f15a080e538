//! Configuration loading
//!
//! Two kinds of files are read here: the application config (which upstream
//! source to use, which profile to load by default) and game type profiles.
//! Both are TOML.

pub mod profile;

pub use profile::{CoordinateSpace, GameTypeProfile, WorldSettings};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an application config file
pub const CONFIG_ENV_VAR: &str = "LAYOUT_AI_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Upstream text source selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Source kind: `fake` or `file`
    pub provider: String,
    pub model_name: Option<String>,
    /// Recorded response replayed by the `file` source
    pub response_file: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            provider: "fake".to_string(),
            model_name: None,
            response_file: None,
        }
    }
}

/// Logging defaults, overridden by `RUST_LOG`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Profile used when a command does not name one
    pub default_profile: Option<PathBuf>,
    /// JSON schema text handed to the model in the system message
    pub schema_file: Option<PathBuf>,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file; relative paths inside it resolve against its directory
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Load configuration from the first location that applies:
    /// an explicit path, `$LAYOUT_AI_CONFIG`, the platform config directory.
    /// Falls back to defaults when no file is found.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            if !env_path.trim().is_empty() {
                return Self::from_file(Path::new(&env_path));
            }
        }

        if let Some(path) = Self::default_path().filter(|p| p.exists()) {
            return Self::from_file(&path);
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Platform config location, e.g. `~/.config/layout-ai/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "layout-ai").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.default_profile,
            &mut self.schema_file,
            &mut self.source.response_file,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
