//! Application constants
//!
//! Single source of truth for paths and other constants.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/client.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

pub const SERVICE_NAME: &str = "spotify-mcp-relay";

pub const DEFAULT_MCP_SERVER_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_MCP_ENDPOINT: &str = "/mcp";
pub const DEFAULT_MCP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CLIENT_PORT: u16 = 8090;
pub const DEFAULT_BIND: &str = "0.0.0.0:8090";

pub const DEFAULT_MODEL_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_MODEL_API_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 150;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Placeholder substituted with the user's command in the prompt template
pub const COMMAND_PLACEHOLDER: &str = "{{command}}";
