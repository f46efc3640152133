//! Runtime configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! TOML file, and `RELAY__*` environment variables with `__` between path
//! segments (e.g. `RELAY__BACKEND__BASE_URL`).

use std::collections::HashMap;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "relay.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong type.
    #[error("invalid configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the REST backend.
    pub base_url: String,
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
    /// User-Agent header sent with every call.
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_ms: 30_000,
            user_agent: format!("Relay/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Backend connection.
    pub backend: BackendConfig,
    /// Logging.
    pub log: LogConfig,
}

impl RelayConfig {
    /// Loads `relay.toml` (if present) and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE), None)
    }

    /// Loads an optional file, then environment overrides.
    ///
    /// `vars` replaces the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or a value has the wrong
    /// type.
    pub fn load_from(
        path: &Path,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Self::environment(vars))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Parses configuration from TOML text, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a value has the
    /// wrong type.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    fn environment(vars: Option<HashMap<String, String>>) -> Environment {
        Environment::with_prefix("RELAY")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(vars)
    }
}
