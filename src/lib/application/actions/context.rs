use super::models::ToolKind;
use super::outcome::ActionReport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::info;
use utoipa::ToSchema;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A track entry as returned by the server's info lookup
pub type Track = Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Track,
    Album,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Track => "track",
            ItemKind::Album => "album",
        }
    }

    /// `spotify:<kind>:<id>`
    pub fn uri(self, id: &str) -> String {
        format!("spotify:{}:{id}", self.as_str())
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The item a search step resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchResult {
    pub name: String,
    pub uri: String,
    pub id: String,
    pub artist: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

impl SearchResult {
    pub fn new(
        kind: ItemKind,
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            name: name.into(),
            uri: kind.uri(&id),
            id,
            artist: artist.into(),
            kind,
        }
    }

    /// URI handed to playback; a bare id is taken to be a track
    pub fn playable_uri(&self) -> String {
        if self.uri.contains(':') {
            self.uri.clone()
        } else {
            ItemKind::Track.uri(&self.uri)
        }
    }

    /// "<kind> <name> by <artist>"
    pub fn describe(&self) -> String {
        format!("{} {} by {}", self.kind, self.name, self.artist)
    }
}

/// State threaded through one sequence execution.
///
/// Created empty per request and dropped with it. Only successful search and
/// info steps write to it; a later search replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
    last_search_result: Option<SearchResult>,
    last_album_tracks: Option<Vec<Track>>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_search_result(&self) -> Option<&SearchResult> {
        self.last_search_result.as_ref()
    }

    pub fn last_album_tracks(&self) -> Option<&[Track]> {
        self.last_album_tracks.as_deref()
    }

    pub fn remember_search(&mut self, result: SearchResult) {
        info!(uri = %result.uri, name = %result.name, "Updated search context");
        self.last_search_result = Some(result);
    }

    pub fn remember_album_tracks(&mut self, tracks: Vec<Track>) {
        info!(count = tracks.len(), "Updated album tracks context");
        self.last_album_tracks = Some(tracks);
    }

    /// Fold a successful step into the context
    pub fn record(&mut self, kind: ToolKind, report: &ActionReport) {
        match kind {
            ToolKind::Search => {
                if let Some(hit) = report.search_hit() {
                    self.remember_search(hit.clone());
                }
            }
            ToolKind::GetInfo => {
                if let Some(tracks) = report.album_tracks() {
                    self.remember_album_tracks(tracks);
                }
            }
            ToolKind::Playback | ToolKind::Queue | ToolKind::Playlist => {}
        }
    }
}
