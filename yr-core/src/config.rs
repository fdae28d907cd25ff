use std::{fs, path::PathBuf, time::Duration};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::ConfigError;

/// Transport options for the forecast clients.
///
/// Everything here is a boundary concern: the clients attach no timeout of
/// their own and never retry, so the values below are the whole story.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Identifying `user-agent` header sent with location-forecast requests.
    /// api.met.no rejects requests that lack one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout in seconds for the whole request, connect included.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Scheme and host of the legacy place-forecast endpoint.
    #[serde(default = "default_place_base_url")]
    pub place_base_url: String,

    /// Base URL of the location-forecast endpoint.
    #[serde(default = "default_location_base_url")]
    pub location_base_url: String,
}

fn default_user_agent() -> String {
    concat!("yr-core/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_place_base_url() -> String {
    "http://yr.no".to_string()
}

fn default_location_base_url() -> String {
    "https://api.met.no/weatherapi/locationforecast/2.0".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            place_base_url: default_place_base_url(),
            location_base_url: default_location_base_url(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from disk, or return the defaults if the file doesn't
    /// exist yet. Every field is optional in the file.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        Ok(config)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("no", "yr", "yr-cli").ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
