use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("environment variable {key} has invalid value '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("retry.max_attempts must be at least 1")]
    InvalidRetry,

    #[error("missing required field 'mcp.url' in configuration")]
    MissingServerUrl,

    #[error("invalid bind address '{bind}'")]
    InvalidBind { bind: String },

    #[error("prompt template must contain the {{{{command}}}} placeholder")]
    InvalidPromptTemplate,
}
