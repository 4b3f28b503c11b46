use super::error::ConfigError;
use super::model::ModelConfig;
use super::retry::RetrySettings;
use super::server::{McpServerConfig, RestServerConfig};
use std::path::Path;

/// Application configuration loaded from client.toml and the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub mcp: McpServerConfig,
    pub rest: RestServerConfig,
    pub model: ModelConfig,
    pub retry: RetrySettings,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }
}
