//! # Configuration Utilities
//!
//! Generic TOML loading shared by the configuration structures.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::server::error::{Result, ServerError};

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error, tagged with the path
///
/// # Example
/// ```ignore
/// let config: ServerConfig = load_config("config/server.toml")?;
/// ```
pub fn load_config<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ServerError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ServerError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
