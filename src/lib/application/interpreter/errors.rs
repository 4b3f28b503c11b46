use crate::infrastructure::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpretError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("Received empty response from LLM")]
    EmptyResponse,
    #[error("LLM response is not valid JSON")]
    NotJson(#[source] serde_json::Error),
    /// The model answered with `{"error": "..."}` instead of actions
    #[error("{0}")]
    Declined(String),
    #[error("action {index} is invalid: {reason}")]
    InvalidAction { index: usize, reason: String },
}

impl InterpretError {
    pub fn invalid_action(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidAction {
            index,
            reason: reason.into(),
        }
    }

    /// Text returned to the caller in the `error` field.
    ///
    /// Answers the model gave on purpose, or that were not JSON at all, are
    /// passed through. Provider failures and malformed actions are wrapped.
    pub fn user_message(&self) -> String {
        match self {
            InterpretError::Declined(_)
            | InterpretError::EmptyResponse
            | InterpretError::NotJson(_) => self.to_string(),
            InterpretError::Model(err) => {
                format!("Failed to parse command: {}", err.user_message())
            }
            InterpretError::InvalidAction { .. } => format!("Failed to parse command: {self}"),
        }
    }
}
