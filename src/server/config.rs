use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::config::load_config;
use crate::server::error::{Result, ServerError};

/// Complete server configuration loaded from TOML file.
///
/// Every field has a default, so an empty file (or no file at all) gives the
/// classroom settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerInfo,
    #[serde(default)]
    pub process: ProcessConfig,
}

/// Settings for identifier assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Identifier given to the first unit built by the issuer
    #[serde(default = "default_first_id")]
    pub first_id: u32,
}

/// Settings for `process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Exclusive upper bound of drawn durations
    #[serde(default = "default_max_duration")]
    pub max_duration: u64,
    /// Highest elapsed time at which `process` still waits
    #[serde(default = "default_delay_threshold")]
    pub delay_threshold: u64,
    /// Milliseconds per duration unit
    #[serde(default = "default_time_unit_ms")]
    pub time_unit_ms: u64,
}

fn default_first_id() -> u32 {
    1
}

fn default_max_duration() -> u64 {
    5
}

fn default_delay_threshold() -> u64 {
    3
}

fn default_time_unit_ms() -> u64 {
    1000
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            first_id: default_first_id(),
        }
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            max_duration: default_max_duration(),
            delay_threshold: default_delay_threshold(),
            time_unit_ms: default_time_unit_ms(),
        }
    }
}

impl ProcessConfig {
    /// Wall-clock wait for a drawn duration.
    pub fn wait_for(&self, duration: u64) -> Duration {
        Duration::from_millis(duration.saturating_mul(self.time_unit_ms))
    }
}

impl ServerConfig {
    /// Load and validate server configuration from a TOML file.
    ///
    /// # Example
    /// ```ignore
    /// let config = ServerConfig::from_file("config/server.toml")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: ServerConfig = load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.process.max_duration == 0 {
            return Err(ServerError::InvalidConfig(
                "process.max_duration must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
