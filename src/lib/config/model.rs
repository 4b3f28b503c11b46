//! # Model Configuration
//!
//! Settings for the OpenAI-compatible endpoint that turns a free-text command
//! into the ordered list of Spotify tool calls.
//!
//! ## Example
//!
//! ```toml
//! [model]
//! endpoint = "https://api.openai.com"
//! api_key = "${OPENAI_API_KEY}"
//! model = "gpt-4.1-mini"
//! max_tokens = 150
//! ```

use super::defaults::{DEFAULT_PROMPT_TEMPLATE, DEFAULT_SYSTEM_MESSAGE};
use super::server::try_expand;
use crate::constants::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_MODEL_API_PATH, DEFAULT_MODEL_ENDPOINT,
};
use serde::Deserialize;

/// Configuration for the instruction model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// API endpoint base URL
    pub endpoint: String,
    /// Chat completion path appended to the endpoint
    pub api_path: String,
    /// Bearer token; absent keys are reported when the first request is made
    pub api_key: Option<String>,
    /// Model identifier used in API calls
    pub model: String,
    pub max_tokens: u32,
    pub system_message: String,
    /// Prompt sent as the user message; must contain `{{command}}`
    pub prompt_template: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_MODEL_ENDPOINT.to_string(),
            api_path: DEFAULT_MODEL_API_PATH.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawModelConfig {
    endpoint: Option<String>,
    api_path: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    system_message: Option<String>,
    prompt_template: Option<String>,
}

impl From<RawModelConfig> for ModelConfig {
    fn from(raw: RawModelConfig) -> Self {
        let defaults = ModelConfig::default();
        Self {
            endpoint: raw.endpoint.unwrap_or(defaults.endpoint),
            api_path: raw.api_path.unwrap_or(defaults.api_path),
            api_key: raw
                .api_key
                .and_then(|key| try_expand(&key))
                .filter(|key| !key.trim().is_empty()),
            model: raw.model.unwrap_or(defaults.model),
            max_tokens: raw.max_tokens.unwrap_or(defaults.max_tokens),
            system_message: raw.system_message.unwrap_or(defaults.system_message),
            prompt_template: raw.prompt_template.unwrap_or(defaults.prompt_template),
        }
    }
}
