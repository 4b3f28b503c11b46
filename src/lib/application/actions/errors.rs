use thiserror::Error;

/// Faults raised while running actions.
///
/// `InvalidParameters` is folded into a failed step by the dispatcher; the
/// others abort the whole sequence.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("invalid parameters for {tool}: {source}")]
    InvalidParameters {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode parameters for {tool}: {source}")]
    EncodeParameters {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("action execution panicked: {0}")]
    Panicked(String),
}
