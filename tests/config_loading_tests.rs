// Config loading tests - AppConfig::load against files on disk
//
// Environment overrides are read from the process environment, so every test
// that loads a file runs serially and clears the relevant variables first.

use serial_test::serial;
use spotify_mcp_relay::config::loader::ensure_env_loaded;
use spotify_mcp_relay::config::{AppConfig, ConfigError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const OVERRIDES: [&str; 7] = [
    "MCP_SERVER_URL",
    "MCP_CLIENT_PORT",
    "OPENAI_API_KEY",
    "OPENAI_MODEL",
    "OPENAI_MAX_TOKENS",
    "MCP_MAX_RETRIES",
    "MCP_RETRY_DELAY_MS",
];

fn clear_overrides() {
    ensure_env_loaded();
    for key in OVERRIDES {
        unsafe { env::remove_var(key) };
    }
}

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("client.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

#[test]
#[serial]
fn returns_error_when_file_not_found() {
    clear_overrides();
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/client.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
#[serial]
fn returns_parse_error_for_invalid_toml() {
    clear_overrides();
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[mcp\nurl = ");

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
#[serial]
fn loads_all_sections() {
    clear_overrides();
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
[mcp]
url = "http://spotify-mcp:8080"
endpoint = "/mcp"
timeout_secs = 5

[rest]
bind = "127.0.0.1:9100"

[model]
endpoint = "https://llm.example.com"
api_key = "sk-test"
model = "gpt-test"
max_tokens = 200
prompt_template = "Command: {{command}}"

[retry]
max_attempts = 5
base_delay_ms = 250
"#,
    );

    let config = AppConfig::load(Some(&path)).expect("valid config");

    assert_eq!(config.mcp.endpoint_url(), "http://spotify-mcp:8080/mcp");
    assert_eq!(config.mcp.timeout_secs, 5);
    assert_eq!(config.rest.bind, "127.0.0.1:9100");
    assert_eq!(config.model.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.model.max_tokens, 200);
    assert_eq!(config.model.prompt_template, "Command: {{command}}");
    assert_eq!(config.retry.policy().max_attempts(), 5);
}

#[test]
#[serial]
fn missing_sections_fall_back_to_defaults() {
    clear_overrides();
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[mcp]\nurl = \"http://localhost:8080\"\n");

    let config = AppConfig::load(Some(&path)).expect("valid config");
    let defaults = AppConfig::default();

    assert_eq!(config.rest, defaults.rest);
    assert_eq!(config.retry, defaults.retry);
    assert_eq!(config.model.model, defaults.model.model);
    assert!(config.model.api_key.is_none());
}

#[test]
#[serial]
fn environment_wins_over_file() {
    clear_overrides();
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        "[mcp]\nurl = \"http://from-file:8080\"\n\n[rest]\nbind = \"0.0.0.0:8090\"\n",
    );
    unsafe {
        env::set_var("MCP_SERVER_URL", "http://from-env:8080");
        env::set_var("MCP_CLIENT_PORT", "9999");
        env::set_var("MCP_MAX_RETRIES", "7");
    }

    let config = AppConfig::load(Some(&path));
    clear_overrides();
    let config = config.expect("valid config");

    assert_eq!(config.mcp.url, "http://from-env:8080");
    assert_eq!(config.rest.bind, "0.0.0.0:9999");
    assert_eq!(config.retry.max_attempts, 7);
}

#[test]
#[serial]
fn invalid_environment_value_is_reported() {
    clear_overrides();
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "");
    unsafe { env::set_var("OPENAI_MAX_TOKENS", "lots") };

    let result = AppConfig::load(Some(&path));
    clear_overrides();

    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnv { ref key, .. }) if key == "OPENAI_MAX_TOKENS"
    ));
}

#[test]
#[serial]
fn rejects_bad_bind_address() {
    clear_overrides();
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[rest]\nbind = \"not an address\"\n");

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::InvalidBind { .. })));
}
