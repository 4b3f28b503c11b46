use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::error::ToolInvokeError;
use super::remote::RemoteResult;

/// An initialised MCP session able to run named tools
#[async_trait]
pub trait ToolSession: Send + Sync {
    async fn call_tool(&self, name: &str, arguments: Value)
    -> Result<RemoteResult, ToolInvokeError>;

    /// Release the session on the server; best effort
    async fn close(&self) {}
}

/// Opens a fresh session for each relayed command
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn ToolSession>, ToolInvokeError>;
}
