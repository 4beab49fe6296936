//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument / environment variable (supplied as [`ConfigOverrides`])
//! 2. TOML config file
//! 3. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "REFLECT_CONFIG";

/// Directory name used under the platform config directory
const CONFIG_DIR_NAME: &str = "emotion-reflection";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of a TOML config file
///
/// Every field is optional; absent fields fall through to compiled defaults.
///
/// ```toml
/// host = "127.0.0.1"
/// port = 8080
/// cors_origins = ["http://localhost:3000", "https://reflect.example.org"]
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cors_origins: Option<Vec<String>>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse TOML config text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cors_origins: Option<Vec<String>>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve configuration from overrides, the config file and defaults
    ///
    /// `config_path` is the `--config` argument, if any. A missing file at a
    /// default location is not an error; an explicitly named file must exist.
    pub fn resolve(overrides: ConfigOverrides, config_path: Option<&Path>) -> Result<Self> {
        let file = match resolve_config_path(config_path) {
            Some(path) => {
                info!("Loading config file: {}", path.display());
                TomlConfig::from_file(&path).map_err(|e| {
                    Error::Config(format!("Failed to load {}: {}", path.display(), e))
                })?
            }
            None => {
                debug!("No config file found, using compiled defaults");
                TomlConfig::default()
            }
        };

        let config = Self::merge(overrides, file);
        config.validate()?;
        Ok(config)
    }

    /// Merge overrides over file values over compiled defaults
    pub fn merge(overrides: ConfigOverrides, file: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            cors_origins: overrides
                .cors_origins
                .or(file.cors_origins)
                .unwrap_or(defaults.cors_origins),
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or(defaults.log_level),
        }
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(Error::Config("port must be non-zero".to_string()));
        }
        if let Some(origin) = self.cors_origins.iter().find(|o| o.trim().is_empty()) {
            return Err(Error::Config(format!("invalid CORS origin: {:?}", origin)));
        }
        if self.log_level.trim().is_empty() {
            return Err(Error::Config("log_level must not be empty".to_string()));
        }
        Ok(())
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Locate the config file
///
/// Priority: command-line argument, then `REFLECT_CONFIG`, then the first
/// existing default location.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_paths().into_iter().find(|p| p.exists())
}

/// Platform default config file locations, most specific first
fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(CONFIG_DIR_NAME).join("config.toml"));
    }
    if cfg!(target_os = "linux") {
        paths.push(PathBuf::from("/etc").join(CONFIG_DIR_NAME).join("config.toml"));
    }
    paths
}
