use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolInvokeError {
    #[error("MCP server at '{endpoint}' is unreachable: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("MCP server '{endpoint}' transport error: {message}")]
    Transport { endpoint: String, message: String },
    #[error("MCP server '{endpoint}' returned invalid JSON: {source}")]
    InvalidJson {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("MCP server '{endpoint}' returned JSON-RPC error {code}: {message}")]
    Rpc {
        endpoint: String,
        code: i64,
        message: String,
    },
    #[error("MCP server '{endpoint}' sent no response for request {request}")]
    MissingResponse { endpoint: String, request: u64 },
}
