use serde::{Deserialize, Serialize};

/// Raw JSON payload used when a result carries no text block
pub const EMPTY_PAYLOAD: &str = "{}";

/// One block of a `tools/call` result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_string()),
            text: Some(text.into()),
        }
    }
}

/// Result of a single remote tool invocation.
///
/// `is_error` is the tool-level failure flag reported by the server; transport
/// and protocol failures never produce a `RemoteResult` and surface as
/// [`ToolInvokeError`](super::ToolInvokeError) instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteResult {
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl RemoteResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            is_error: false,
            content: vec![ContentBlock::text(text)],
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            content: vec![ContentBlock::text(text)],
        }
    }

    /// First content block that bears a text field
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| block.text.as_deref())
    }

    /// Text payload to decode, `"{}"` when the result has none
    pub fn payload(&self) -> &str {
        self.first_text().unwrap_or(EMPTY_PAYLOAD)
    }

    /// Trimmed remote detail for error messages, if any
    pub fn detail(&self) -> Option<&str> {
        self.first_text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
