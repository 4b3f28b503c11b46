//! Typed parameter views for each tool.
//!
//! The instruction list carries parameters as a free-form mapping. Each kind
//! narrows it to the fields it reads; anything else is kept in `extra` and
//! forwarded to the server untouched. String fields also take unquoted
//! numbers, so `"playlist_id": 42` reads as `"42"`.

use super::errors::ExecutionError;
use super::models::ToolKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub fn narrow<T: DeserializeOwned>(
    kind: ToolKind,
    parameters: &Map<String, Value>,
) -> Result<T, ExecutionError> {
    serde_json::from_value(Value::Object(parameters.clone())).map_err(|source| {
        ExecutionError::InvalidParameters {
            tool: kind.tool_name(),
            source,
        }
    })
}

pub fn encode<P: Serialize>(kind: ToolKind, params: &P) -> Result<Value, ExecutionError> {
    serde_json::to_value(params).map_err(|source| ExecutionError::EncodeParameters {
        tool: kind.tool_name(),
        source,
    })
}

fn lenient_text<E: serde::de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(E::custom(format!("expected a string, found {other}"))),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    lenient_text(Value::deserialize(deserializer)?)
}

fn lenient_strings<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| lenient_text(item).transpose())
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        single => Ok(lenient_text(single)?.map(|id| vec![id])),
    }
}

/// A string parameter counts as given only when it is non-blank
pub fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qtype: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchParams {
    pub fn wants_album(&self) -> bool {
        present(&self.qtype) == Some("album")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetInfoParams {
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackParams {
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueParams {
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistParams {
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_ids: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlaylistParams {
    pub fn has_track_ids(&self) -> bool {
        self.track_ids.as_ref().is_some_and(|ids| !ids.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn unknown_fields_are_forwarded() {
        let params: SearchParams = narrow(
            ToolKind::Search,
            &map(json!({ "query": "Test Song", "qtype": "track", "market": "DE" })),
        )
        .expect("narrow");
        assert_eq!(params.query.as_deref(), Some("Test Song"));

        let encoded = encode(ToolKind::Search, &params).expect("encode");
        assert_eq!(
            encoded,
            json!({ "query": "Test Song", "qtype": "track", "market": "DE" })
        );
    }

    #[test]
    fn null_fields_are_absent() {
        let params: GetInfoParams =
            narrow(ToolKind::GetInfo, &map(json!({ "item_uri": null }))).expect("narrow");
        assert!(params.item_uri.is_none());
        assert_eq!(encode(ToolKind::GetInfo, &params).expect("encode"), json!({}));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = narrow::<PlaylistParams>(
            ToolKind::Playlist,
            &map(json!({ "action": "add_tracks", "track_ids": { "first": "t1" } })),
        )
        .expect_err("track_ids must be a list");
        assert!(err.to_string().contains("SpotifyPlaylist"));
    }

    #[test]
    fn numeric_ids_are_read_as_strings() {
        let params: PlaylistParams = narrow(
            ToolKind::Playlist,
            &map(json!({
                "action": "add_tracks",
                "playlist_id": 42,
                "track_ids": [7, "t2", null]
            })),
        )
        .expect("narrow");

        assert_eq!(params.playlist_id.as_deref(), Some("42"));
        assert_eq!(params.track_ids, Some(vec!["7".to_string(), "t2".to_string()]));
    }

    #[test]
    fn search_limit_is_forwarded_as_given() {
        let raw = json!({ "query": "Song A", "qtype": "track", "limit": "1" });
        let params: SearchParams = narrow(ToolKind::Search, &map(raw.clone())).expect("narrow");
        assert_eq!(encode(ToolKind::Search, &params).expect("encode"), raw);
    }

    #[test]
    fn blank_strings_are_not_present() {
        assert_eq!(present(&Some("  ".into())), None);
        assert_eq!(present(&Some("spotify:track:1".into())), Some("spotify:track:1"));
        assert_eq!(present(&None), None);
    }
}
