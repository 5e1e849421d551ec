use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the server unit and its supporting pieces.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The wait inside `process` was cut short by the shutdown signal.
    #[error("Server {id} interrupted while processing for {duration} sec")]
    Interrupted { id: u32, duration: u64 },

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The issuer already handed out its last identifier.
    #[error("server identifiers exhausted after {last}")]
    IdsExhausted { last: u32 },

    #[error("failed to write run summary {path}: {source}")]
    SummaryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode run summary: {0}")]
    SummaryEncode(#[source] serde_json::Error),
}

impl ServerError {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, ServerError::Interrupted { .. })
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
