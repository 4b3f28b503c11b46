use super::AppConfig;
use super::error::ConfigError;
use super::model::RawModelConfig;
use super::retry::RawRetry;
use super::server::{RawMcpServer, RawRestServer};
use crate::constants::{COMMAND_PLACEHOLDER, CONFIG_PATH, ENV_PATH};
use dotenvy::{dotenv, from_filename};
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::sync::Once;
use tracing::{debug, info, warn};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub mcp: RawMcpServer,
    #[serde(default)]
    pub rest: RawRestServer,
    #[serde(default)]
    pub model: RawModelConfig,
    #[serde(default)]
    pub retry: RawRetry,
}

/// Ensures environment variables are loaded from config/.env and .env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        if from_filename(ENV_PATH).is_ok() {
            debug!(path = ENV_PATH, "Loaded environment file");
        }
        if dotenv().is_ok() {
            debug!("Loaded .env from working directory");
        }
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let raw = match path {
        Some(path) => read_raw(path)?,
        None => match read_raw(Path::new(CONFIG_PATH)) {
            Ok(raw) => raw,
            Err(ConfigError::NotFound { .. }) => {
                info!("Configuration file not found; using defaults");
                RawConfig::default()
            }
            Err(other) => return Err(other),
        },
    };

    let mut config = build(raw);
    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

fn read_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    debug!(path = %path.display(), "Reading relay configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn build(raw: RawConfig) -> AppConfig {
    AppConfig {
        mcp: raw.mcp.into(),
        rest: raw.rest.into(),
        model: raw.model.into(),
        retry: raw.retry.into(),
    }
}

/// Environment variables take precedence over the file
pub(super) fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("MCP_SERVER_URL") {
        config.mcp.url = url;
    }
    if let Some(port) = parse_var::<u16, _>(&lookup, "MCP_CLIENT_PORT")? {
        config.rest = config.rest.with_port(port);
    }
    if let Some(key) = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()) {
        config.model.api_key = Some(key);
    }
    if let Some(model) = lookup("OPENAI_MODEL") {
        config.model.model = model;
    }
    if let Some(max_tokens) = parse_var(&lookup, "OPENAI_MAX_TOKENS")? {
        config.model.max_tokens = max_tokens;
    }
    if let Some(attempts) = parse_var(&lookup, "MCP_MAX_RETRIES")? {
        config.retry.max_attempts = attempts;
    }
    if let Some(delay) = parse_var(&lookup, "MCP_RETRY_DELAY_MS")? {
        config.retry.base_delay_ms = delay;
    }
    Ok(())
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                key: key.to_string(),
                value,
            }),
        None => Ok(None),
    }
}

pub(super) fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.mcp.url.trim().is_empty() {
        return Err(ConfigError::MissingServerUrl);
    }
    if config.retry.max_attempts == 0 {
        return Err(ConfigError::InvalidRetry);
    }
    config.rest.socket_addr()?;
    if !config.model.prompt_template.contains(COMMAND_PLACEHOLDER) {
        return Err(ConfigError::InvalidPromptTemplate);
    }
    if config.model.api_key.is_none() {
        warn!("OPENAI_API_KEY not found in configuration or environment");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = build(RawConfig::default());
        apply_env_overrides(
            &mut config,
            env_of(&[
                ("MCP_SERVER_URL", "http://mcp:9000"),
                ("MCP_CLIENT_PORT", "9100"),
                ("OPENAI_MODEL", "gpt-4o-mini"),
                ("OPENAI_MAX_TOKENS", "300"),
                ("MCP_MAX_RETRIES", "5"),
            ]),
        )
        .expect("overrides apply");

        assert_eq!(config.mcp.url, "http://mcp:9000");
        assert_eq!(config.rest.bind, "0.0.0.0:9100");
        assert_eq!(config.model.model, "gpt-4o-mini");
        assert_eq!(config.model.max_tokens, 300);
        assert_eq!(config.retry.max_attempts, 5);
    }

    #[test]
    fn rejects_non_numeric_port() {
        let mut config = build(RawConfig::default());
        let result = apply_env_overrides(&mut config, env_of(&[("MCP_CLIENT_PORT", "eighty")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { ref key, .. }) if key == "MCP_CLIENT_PORT"
        ));
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let mut config = build(RawConfig::default());
        apply_env_overrides(&mut config, env_of(&[("OPENAI_API_KEY", "  ")])).expect("apply");
        assert!(config.model.api_key.is_none());
    }

    #[test]
    fn zero_attempts_fail_validation() {
        let mut config = build(RawConfig::default());
        config.retry.max_attempts = 0;
        assert!(matches!(validate(&config), Err(ConfigError::InvalidRetry)));
    }

    #[test]
    fn template_without_placeholder_fails_validation() {
        let mut config = build(RawConfig::default());
        config.model.prompt_template = "no placeholder here".into();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPromptTemplate)
        ));
    }

    #[test]
    fn defaults_are_valid() {
        let config = build(RawConfig::default());
        assert!(validate(&config).is_ok());
    }
}
