//! Configuration and logging setup errors

use std::path::PathBuf;

/// Errors from loading a [`ViewConfig`](crate::config::ViewConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors from installing the file logger.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to create log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger already installed: {0}")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}
