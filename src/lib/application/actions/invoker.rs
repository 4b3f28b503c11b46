use super::models::ToolKind;
use crate::application::tooling::{
    RemoteResult, RetryPolicy, ToolInvokeError, ToolSession, call_tool_with_retry,
};
use serde_json::Value;
use tracing::error;

/// Session plus retry policy shared by every handler of one sequence
#[derive(Clone, Copy)]
pub struct ToolInvoker<'a> {
    session: &'a dyn ToolSession,
    policy: RetryPolicy,
}

/// Why a tool call produced no usable answer
#[derive(Debug)]
pub enum RemoteFailure {
    /// The server answered with `isError`
    Rejected { detail: Option<String> },
    /// Every attempt failed at the transport or protocol level
    Unreachable(ToolInvokeError),
}

impl RemoteFailure {
    /// `base`, suffixed with the server's detail text when it gave one
    pub fn message(&self, base: &str) -> String {
        match self {
            RemoteFailure::Rejected {
                detail: Some(detail),
            } => format!("{base}: {detail}"),
            _ => base.to_string(),
        }
    }
}

impl<'a> ToolInvoker<'a> {
    pub fn new(session: &'a dyn ToolSession, policy: RetryPolicy) -> Self {
        Self { session, policy }
    }

    /// Call the tool with retries and split out server-side refusals
    pub async fn call(
        &self,
        kind: ToolKind,
        arguments: &Value,
    ) -> Result<RemoteResult, RemoteFailure> {
        let tool = kind.tool_name();
        match call_tool_with_retry(self.session, tool, arguments, &self.policy).await {
            Ok(result) if result.is_error => {
                let detail = result.detail().map(str::to_string);
                error!(tool = %kind, detail = detail.as_deref(), "Tool reported an error");
                Err(RemoteFailure::Rejected { detail })
            }
            Ok(result) => Ok(result),
            Err(err) => {
                error!(tool = %kind, %err, "Tool unreachable");
                Err(RemoteFailure::Unreachable(err))
            }
        }
    }
}
