//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ModelConfig;
use crate::domain::types::ChatMessage;
use crate::infrastructure::model::traits::ModelProvider;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};

const PROVIDER_ID: &str = "openai";

/// Client for any endpoint speaking the OpenAI chat completions API
#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
    api_path: String,
}

impl OpenAIClient {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            base: HttpClientBase::new(PROVIDER_ID, config.endpoint.clone(), config.api_key.clone()),
            api_path: config.api_path.clone(),
        }
    }

    pub fn url(&self) -> String {
        self.base.build_url(&self.api_path)
    }
}

#[async_trait]
impl ModelProvider for OpenAIClient {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.base.require_api_key()?;
        let url = self.url();
        let payload = OpenAIRequest::from_request(&request);

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: OpenAIResponse = self.base.post_with_bearer(&url, &payload).await?;
        debug!("Received response from OpenAI-compatible provider");

        response
            .into_content()
            .map(ModelResponse::new)
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing content"))
    }
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessageRef<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Serialize)]
struct OpenAIMessageRef<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> OpenAIRequest<'a> {
    fn from_request(request: &'a ModelRequest) -> Self {
        Self {
            model: &request.model,
            messages: request.messages.iter().map(OpenAIMessageRef::from).collect(),
            max_tokens: request.max_tokens,
            stream: false,
        }
    }
}

impl<'a> From<&'a ChatMessage> for OpenAIMessageRef<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

impl OpenAIResponse {
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}
