use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The closed set of Spotify MCP tools the relay knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Search,
    GetInfo,
    Playback,
    Queue,
    Playlist,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Search,
        ToolKind::GetInfo,
        ToolKind::Playback,
        ToolKind::Queue,
        ToolKind::Playlist,
    ];

    /// Tool name registered on the MCP server
    pub fn tool_name(self) -> &'static str {
        match self {
            ToolKind::Search => "SpotifySearch",
            ToolKind::GetInfo => "SpotifyGetInfo",
            ToolKind::Playback => "SpotifyPlayback",
            ToolKind::Queue => "SpotifyQueue",
            ToolKind::Playlist => "SpotifyPlaylist",
        }
    }

    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tool_name() == name)
    }

    /// A failed critical step leaves nothing for later steps to resolve against
    pub fn is_critical(self) -> bool {
        matches!(self, ToolKind::Search)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_name())
    }
}

/// One tool invocation requested by the parsed instruction list.
///
/// `kind` stays a string: an unknown tool name is reported as a failed step
/// when dispatched rather than rejected while parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "tool_name")]
    pub kind: String,
    #[serde(rename = "params", default)]
    pub parameters: Map<String, Value>,
}

impl Action {
    /// Non-object parameter values are treated as an empty mapping
    pub fn new(kind: impl Into<String>, parameters: Value) -> Self {
        let parameters = match parameters {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            kind: kind.into(),
            parameters,
        }
    }

    pub fn tool_kind(&self) -> Option<ToolKind> {
        ToolKind::from_tool_name(&self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_tool_name(kind.tool_name()), Some(kind));
        }
        assert_eq!(ToolKind::from_tool_name("SpotifyDance"), None);
    }

    #[test]
    fn only_search_is_critical() {
        let critical: Vec<_> = ToolKind::ALL
            .into_iter()
            .filter(|kind| kind.is_critical())
            .collect();
        assert_eq!(critical, vec![ToolKind::Search]);
    }

    #[test]
    fn action_decodes_from_instruction_shape() {
        let action: Action = serde_json::from_value(json!({
            "tool_name": "SpotifyPlayback",
            "params": { "action": "start" }
        }))
        .expect("decode");

        assert_eq!(action.tool_kind(), Some(ToolKind::Playback));
        assert_eq!(action.parameters.get("action"), Some(&json!("start")));
    }
}
