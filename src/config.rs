//! Service configuration.
//!
//! Settings come from `gangamon.toml` (path overridable via `GANGAMON_CONFIG`),
//! with `HOST`/`PORT` environment overrides applied last. A missing config
//! file is not an error: every field has a default matching the standard
//! deployment layout, so the binaries run out of the box.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::InitError;

/// Config file the binaries look for when `GANGAMON_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "gangamon.toml";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "GANGAMON_CONFIG";

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level service settings. Unknown keys are rejected so a typo in the
/// file fails startup instead of silently falling back to a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Monitoring location published in every report and used as the API
    /// route slug (lowercased).
    pub location: String,
    /// Historical dataset CSV.
    pub data_file: PathBuf,
    /// Directory holding one model artifact per parameter.
    pub models_dir: PathBuf,
    pub server: ServerConfig,
}

/// HTTP listener settings for the API binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            location: "Varanasi".to_string(),
            data_file: PathBuf::from("data/ganga_multi_parameter_data.csv"),
            models_dir: PathBuf::from("data/models"),
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// Listen address in `host:port` form.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl ServiceConfig {
    /// Loads configuration for a binary: the file named by `GANGAMON_CONFIG`,
    /// else `gangamon.toml` if present, else pure defaults. `HOST` and `PORT`
    /// override the listener last.
    pub fn load() -> Result<ServiceConfig, InitError> {
        let path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = if path.is_file() {
            ServiceConfig::from_toml_path(&path)?
        } else {
            ServiceConfig::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parses a specific config file. Unlike `load`, a missing file here is
    /// an error: an explicitly named path must exist.
    pub fn from_toml_path(path: &Path) -> Result<ServiceConfig, InitError> {
        let raw = fs::read_to_string(path).map_err(|e| InitError::Read {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| InitError::InvalidConfig(e.to_string()))
    }

    fn apply_env_overrides(&mut self) -> Result<(), InitError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(raw) = env::var("PORT") {
            self.server.port = raw.parse().map_err(|_| {
                InitError::InvalidConfig(format!("PORT must be a port number, got '{}'", raw))
            })?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
