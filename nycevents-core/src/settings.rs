//! User settings at ~/.config/nycevents/config.toml
//!
//! Values can be overridden with `NYCEVENTS_*` environment variables,
//! e.g. `NYCEVENTS_TIMEOUT_SECS=10`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_TIMEOUT_SECS};
use crate::error::{NycEventsError, NycEventsResult};

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_server_host() -> String {
    DEFAULT_SERVER_HOST.to_string()
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Open-data resource URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_server_host")]
    pub server_host: String,

    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            server_host: default_server_host(),
            server_port: default_server_port(),
        }
    }
}

impl Settings {
    pub fn config_path() -> NycEventsResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| NycEventsError::Config("Could not determine config directory".into()))?
            .join("nycevents");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings, writing a commented default file on first use.
    pub fn load() -> NycEventsResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            if let Err(e) = Self::create_default_config(&config_path) {
                tracing::warn!(path = %config_path.display(), error = %e, "could not create default config");
            }
        }

        Self::load_from(&config_path)
    }

    /// Load settings from `path` (optional) layered under the environment.
    pub fn load_from(path: &Path) -> NycEventsResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("NYCEVENTS").try_parsing(true))
            .build()
            .map_err(|e| NycEventsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| NycEventsError::Config(e.to_string()))
    }

    /// Effective settings as TOML, for display.
    pub fn to_toml(&self) -> NycEventsResult<String> {
        toml::to_string_pretty(self).map_err(|e| NycEventsError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> NycEventsResult<()> {
        let contents = format!(
            "\
# nycevents configuration

# Open-data resource to query:
# endpoint = \"{}\"

# Seconds to wait for the endpoint:
# timeout_secs = {}

# Address for nycevents-server:
# server_host = \"{}\"
# server_port = {}
",
            DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NycEventsError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| NycEventsError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
