use super::context::{SearchResult, Track};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

pub const NO_ACTIONS: &str = "No actions to execute";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Command executed successfully";
pub const DEFAULT_PARTIAL_MESSAGE: &str = "Partial success";
pub const PARTIAL_SUFFIX: &str = "Some actions failed";

/// Payload attached to a search or info report
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ReportResult {
    Hit(SearchResult),
    Payload(Value),
}

/// Success record of one step
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ActionReport {
    pub action: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ReportResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlists: Option<Value>,
}

impl ActionReport {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            kind: None,
            message: None,
            result: None,
            item: None,
            tracks: None,
            playlists: None,
        }
    }

    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_result(mut self, result: ReportResult) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_item(mut self, item: SearchResult) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_tracks(mut self, tracks: Value) -> Self {
        self.tracks = Some(tracks);
        self
    }

    pub fn with_playlists(mut self, playlists: Value) -> Self {
        self.playlists = Some(playlists);
        self
    }

    pub fn search_hit(&self) -> Option<&SearchResult> {
        match &self.result {
            Some(ReportResult::Hit(hit)) => Some(hit),
            _ => None,
        }
    }

    /// Non-empty `tracks` list of an info payload
    pub fn album_tracks(&self) -> Option<Vec<Track>> {
        match &self.result {
            Some(ReportResult::Payload(data)) => data
                .get("tracks")
                .and_then(Value::as_array)
                .filter(|tracks| !tracks.is_empty())
                .cloned(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ActionFailure {
    pub error: String,
}

impl ActionFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Result of one step: a report or a user-facing error
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum StepOutcome {
    Success(ActionReport),
    Failure(ActionFailure),
}

impl StepOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        StepOutcome::Failure(ActionFailure::new(error))
    }

    pub fn report(&self) -> Option<&ActionReport> {
        match self {
            StepOutcome::Success(report) => Some(report),
            StepOutcome::Failure(_) => None,
        }
    }

    pub fn failure_detail(&self) -> Option<&ActionFailure> {
        match self {
            StepOutcome::Success(_) => None,
            StepOutcome::Failure(failure) => Some(failure),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.failure_detail().map(|failure| failure.error.as_str())
    }
}

impl From<ActionReport> for StepOutcome {
    fn from(report: ActionReport) -> Self {
        StepOutcome::Success(report)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PartialDetails {
    pub success: ActionReport,
    pub errors: Vec<ActionFailure>,
}

/// Aggregated answer for a whole command
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum FinalResponse {
    Success {
        message: String,
        details: ActionReport,
    },
    Partial {
        message: String,
        details: PartialDetails,
    },
    Failure(ActionFailure),
}

impl FinalResponse {
    pub fn error(error: impl Into<String>) -> Self {
        FinalResponse::Failure(ActionFailure::new(error))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FinalResponse::Failure(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FinalResponse::Success { message, .. } | FinalResponse::Partial { message, .. } => {
                Some(message)
            }
            FinalResponse::Failure(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FinalResponse::Failure(failure) => Some(&failure.error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::actions::context::ItemKind;
    use serde_json::json;

    #[test]
    fn report_omits_absent_fields() {
        let report = ActionReport::new("playback")
            .with_type("pause")
            .with_message("Playback paused");
        assert_eq!(
            serde_json::to_value(&report).expect("encode"),
            json!({ "action": "playback", "type": "pause", "message": "Playback paused" })
        );
    }

    #[test]
    fn search_report_carries_typed_hit() {
        let hit = SearchResult::new(ItemKind::Album, "album123", "Test Album", "Test Artist");
        let report = ActionReport::new("search").with_result(ReportResult::Hit(hit.clone()));
        assert_eq!(report.search_hit(), Some(&hit));
        assert_eq!(
            serde_json::to_value(&report).expect("encode")["result"]["uri"],
            json!("spotify:album:album123")
        );
    }

    #[test]
    fn empty_track_list_is_not_reported() {
        let report = ActionReport::new("get_info")
            .with_result(ReportResult::Payload(json!({ "tracks": [] })));
        assert!(report.album_tracks().is_none());
    }

    #[test]
    fn failure_serialises_as_error_object() {
        let response = FinalResponse::error("No search results found");
        assert_eq!(
            serde_json::to_value(&response).expect("encode"),
            json!({ "error": "No search results found" })
        );
        assert!(response.is_error());
    }

    #[test]
    fn partial_serialises_success_and_errors() {
        let response = FinalResponse::Partial {
            message: "Added item to queue\nSome actions failed".into(),
            details: PartialDetails {
                success: ActionReport::new("queue").with_message("Added item to queue"),
                errors: vec![ActionFailure::new("Playback action failed: start")],
            },
        };
        let value = serde_json::to_value(&response).expect("encode");
        assert_eq!(value["details"]["success"]["action"], json!("queue"));
        assert_eq!(
            value["details"]["errors"][0]["error"],
            json!("Playback action failed: start")
        );
    }
}
