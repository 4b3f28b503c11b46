use super::error::ToolInvokeError;
use super::interface::{SessionConnector, ToolSession};
use super::remote::RemoteResult;
use crate::config::McpServerConfig;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "2025-06-18";
const SESSION_HEADER: &str = "mcp-session-id";
const PROTOCOL_HEADER: &str = "mcp-protocol-version";
const ACCEPT_BOTH: &str = "application/json, text/event-stream";

/// MCP session over the streamable HTTP transport.
///
/// Every JSON-RPC message is a POST to the same endpoint; the server answers
/// either with a plain JSON body or with an event stream that carries the
/// response as one of its `data:` frames.
pub struct HttpSession {
    http: Client,
    endpoint: String,
    session_id: Option<String>,
    id_counter: AtomicU64,
}

impl HttpSession {
    /// Open a session: `initialize` followed by `notifications/initialized`
    pub async fn connect(config: &McpServerConfig) -> Result<Self, ToolInvokeError> {
        let endpoint = config.endpoint_url();
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|source| ToolInvokeError::Connect {
                endpoint: endpoint.clone(),
                source,
            })?;

        let mut session = Self {
            http,
            endpoint,
            session_id: None,
            id_counter: AtomicU64::new(1),
        };

        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {}
        });
        let (init_result, session_id) = session.send_request("initialize", params).await?;
        session.session_id = session_id;
        let server = init_result
            .get("serverInfo")
            .and_then(|info| info.get("name"))
            .and_then(Value::as_str);
        debug!(
            endpoint = %session.endpoint,
            session_id = session.session_id.as_deref(),
            server,
            "MCP session initialised"
        );

        session
            .send_notification("notifications/initialized", json!({}))
            .await?;
        info!(endpoint = %session.endpoint, "Connected to MCP server");
        Ok(session)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    async fn send_request(
        &self,
        method: &str,
        params: Value,
    ) -> Result<(Value, Option<String>), ToolInvokeError> {
        let id = self.next_id();
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });
        let response = self.post(&payload).await?;

        let session_id = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let is_stream = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("text/event-stream"))
            .unwrap_or(false);
        let body = response
            .text()
            .await
            .map_err(|source| self.transport_error(source.to_string()))?;

        let message = if is_stream {
            find_stream_response(&body, id)
        } else {
            Some(serde_json::from_str::<Value>(&body))
        };
        let message = match message {
            Some(Ok(message)) => message,
            Some(Err(source)) => {
                return Err(ToolInvokeError::InvalidJson {
                    endpoint: self.endpoint.clone(),
                    source,
                });
            }
            None => {
                return Err(ToolInvokeError::MissingResponse {
                    endpoint: self.endpoint.clone(),
                    request: id,
                });
            }
        };

        let result = rpc_result(&self.endpoint, message)?;
        Ok((result, session_id))
    }

    async fn send_notification(&self, method: &str, params: Value) -> Result<(), ToolInvokeError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params
        });
        self.post(&payload).await.map(|_| ())
    }

    async fn post(&self, payload: &Value) -> Result<reqwest::Response, ToolInvokeError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, ACCEPT_BOTH)
            .json(payload);
        if let Some(session_id) = &self.session_id {
            request = request
                .header(SESSION_HEADER, session_id)
                .header(PROTOCOL_HEADER, PROTOCOL_VERSION);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ToolInvokeError::Connect {
                endpoint: self.endpoint.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.transport_error(format!("HTTP status {}", status.as_u16())));
        }
        Ok(response)
    }

    fn next_id(&self) -> u64 {
        self.id_counter.fetch_add(1, Ordering::SeqCst)
    }

    fn transport_error(&self, message: impl Into<String>) -> ToolInvokeError {
        ToolInvokeError::Transport {
            endpoint: self.endpoint.clone(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl ToolSession for HttpSession {
    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<RemoteResult, ToolInvokeError> {
        let params = json!({
            "name": name,
            "arguments": match arguments {
                Value::Null => Value::Object(Default::default()),
                other => other,
            }
        });
        let (result, _) = self.send_request("tools/call", params).await?;
        serde_json::from_value(result).map_err(|source| ToolInvokeError::InvalidJson {
            endpoint: self.endpoint.clone(),
            source,
        })
    }

    async fn close(&self) {
        let Some(session_id) = &self.session_id else {
            return;
        };
        let outcome = self
            .http
            .delete(&self.endpoint)
            .header(SESSION_HEADER, session_id)
            .send()
            .await;
        if let Err(err) = outcome {
            warn!(endpoint = %self.endpoint, %err, "Failed to close MCP session");
        }
    }
}

/// Connector that opens an [`HttpSession`] per command
#[derive(Debug, Clone)]
pub struct HttpConnector {
    config: McpServerConfig,
}

impl HttpConnector {
    pub fn new(config: McpServerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionConnector for HttpConnector {
    async fn connect(&self) -> Result<Arc<dyn ToolSession>, ToolInvokeError> {
        let session = HttpSession::connect(&self.config).await?;
        Ok(Arc::new(session))
    }
}

/// Pull the JSON-RPC `result` out of a response, mapping `error` objects
fn rpc_result(endpoint: &str, message: Value) -> Result<Value, ToolInvokeError> {
    if let Some(error) = message.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(-32000);
        let text = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(ToolInvokeError::Rpc {
            endpoint: endpoint.to_string(),
            code,
            message: text,
        });
    }
    Ok(message.get("result").cloned().unwrap_or(Value::Null))
}

/// Scan an event stream for the response to request `id`.
///
/// Frames are separated by blank lines; multi-line `data:` fields are joined
/// with newlines. Frames that are not JSON or belong to other messages
/// (server notifications, progress) are skipped.
fn find_stream_response(body: &str, id: u64) -> Option<Result<Value, serde_json::Error>> {
    let mut last_error = None;
    for frame in body.replace("\r\n", "\n").split("\n\n") {
        let data: Vec<&str> = frame
            .lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(|line| line.strip_prefix(' ').unwrap_or(line))
            .collect();
        if data.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(&data.join("\n")) {
            Ok(message) => {
                if message.get("id").and_then(Value::as_u64) == Some(id) {
                    return Some(Ok(message));
                }
            }
            Err(err) => last_error = Some(err),
        }
    }
    last_error.map(Err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_matching_response_in_event_stream() {
        let body = "event: message\n\
                    data: {\"jsonrpc\":\"2.0\",\"method\":\"notifications/progress\"}\n\
                    \n\
                    event: message\n\
                    data: {\"jsonrpc\":\"2.0\",\"id\":7,\"result\":{\"ok\":true}}\n\
                    \n";

        let message = find_stream_response(body, 7)
            .expect("response present")
            .expect("valid json");
        assert_eq!(message["result"]["ok"], Value::Bool(true));
    }

    #[test]
    fn joins_multi_line_data_fields() {
        let body = "data: {\"jsonrpc\":\"2.0\",\r\ndata: \"id\":3,\"result\":{}}\r\n\r\n";
        let message = find_stream_response(body, 3)
            .expect("response present")
            .expect("valid json");
        assert_eq!(message["id"], json!(3));
    }

    #[test]
    fn missing_response_yields_none() {
        let body = "data: {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{}}\n\n";
        assert!(find_stream_response(body, 2).is_none());
    }

    #[test]
    fn rpc_error_is_mapped() {
        let message = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "Unknown tool: SpotifyDance" }
        });
        let err = rpc_result("http://mcp/mcp", message).expect_err("rpc error");
        assert!(matches!(
            err,
            ToolInvokeError::Rpc { code: -32602, ref message, .. }
                if message.contains("SpotifyDance")
        ));
    }

    #[test]
    fn tool_result_decodes_into_remote_result() {
        let message = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "content": [{ "type": "text", "text": "{\"tracks\":[]}" }],
                "isError": false
            }
        });
        let result: RemoteResult =
            serde_json::from_value(rpc_result("http://mcp/mcp", message).expect("ok"))
                .expect("decode");
        assert_eq!(result.payload(), "{\"tracks\":[]}");
    }
}
