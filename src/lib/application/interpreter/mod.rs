//! Turns a free-text command into an action list via the language model.

pub mod errors;
pub mod parser;

pub use errors::InterpretError;
pub use parser::parse_instructions;

use crate::application::actions::Action;
use crate::config::ModelConfig;
use crate::constants::COMMAND_PLACEHOLDER;
use crate::domain::types::ChatMessage;
use crate::infrastructure::model::{ModelProvider, ModelRequest};
use tracing::{debug, info};

pub struct CommandInterpreter<P: ModelProvider> {
    provider: P,
    config: ModelConfig,
}

impl<P: ModelProvider> CommandInterpreter<P> {
    pub fn new(provider: P, config: ModelConfig) -> Self {
        Self { provider, config }
    }

    pub fn render_prompt(&self, command: &str) -> String {
        self.config
            .prompt_template
            .replace(COMMAND_PLACEHOLDER, command)
    }

    pub async fn interpret(&self, command: &str) -> Result<Vec<Action>, InterpretError> {
        let request = ModelRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.config.system_message.clone()),
                ChatMessage::user(self.render_prompt(command)),
            ],
            max_tokens: Some(self.config.max_tokens),
        };

        let response = self.provider.chat(request).await?;
        info!(content = response.content(), "LLM response content");

        let actions = parse_instructions(response.content())?;
        debug!(
            count = actions.len(),
            tools = ?actions.iter().map(|action| action.kind.as_str()).collect::<Vec<_>>(),
            "Parsed instruction list"
        );
        Ok(actions)
    }
}
