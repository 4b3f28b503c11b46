use super::decode_payload;
use crate::application::actions::errors::ExecutionError;
use crate::application::actions::invoker::ToolInvoker;
use crate::application::actions::models::ToolKind;
use crate::application::actions::outcome::{ActionReport, StepOutcome};
use crate::application::actions::params::{PlaylistParams, encode, present};
use serde_json::Value;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaylistCommand<'a> {
    Get,
    GetTracks,
    AddTracks,
    RemoveTracks,
    ChangeDetails,
    Unknown(&'a str),
}

impl<'a> PlaylistCommand<'a> {
    fn parse(action: &'a str) -> Self {
        match action {
            "get" => PlaylistCommand::Get,
            "get_tracks" => PlaylistCommand::GetTracks,
            "add_tracks" => PlaylistCommand::AddTracks,
            "remove_tracks" => PlaylistCommand::RemoveTracks,
            "change_details" => PlaylistCommand::ChangeDetails,
            other => PlaylistCommand::Unknown(other),
        }
    }
}

/// Sub-action dispatch for playlist management. Required fields are checked
/// before anything is sent to the server.
pub async fn handle(
    invoker: &ToolInvoker<'_>,
    params: PlaylistParams,
) -> Result<StepOutcome, ExecutionError> {
    let action = params.action.clone().unwrap_or_default();
    match PlaylistCommand::parse(action.trim()) {
        PlaylistCommand::Get => list_playlists(invoker, &params).await,
        PlaylistCommand::GetTracks => {
            if present(&params.playlist_id).is_none() {
                return Ok(StepOutcome::failure(
                    "playlist_id is required for get_tracks action",
                ));
            }
            list_tracks(invoker, &params).await
        }
        command @ (PlaylistCommand::AddTracks | PlaylistCommand::RemoveTracks) => {
            if present(&params.playlist_id).is_none() || !params.has_track_ids() {
                return Ok(StepOutcome::failure(format!(
                    "playlist_id and track_ids are required for {} action",
                    action.trim()
                )));
            }
            let (failure, message) = if command == PlaylistCommand::AddTracks {
                ("Failed to add tracks", "Tracks added to playlist")
            } else {
                ("Failed to remove tracks", "Tracks removed from playlist")
            };
            modify(invoker, &params, action.trim(), failure, message).await
        }
        PlaylistCommand::ChangeDetails => {
            let has_detail =
                present(&params.name).is_some() || present(&params.description).is_some();
            if present(&params.playlist_id).is_none() || !has_detail {
                return Ok(StepOutcome::failure(
                    "playlist_id and at least one of name or description are required",
                ));
            }
            modify(
                invoker,
                &params,
                "change_details",
                "Failed to change playlist details",
                "Playlist details updated",
            )
            .await
        }
        PlaylistCommand::Unknown(other) => {
            let label = if other.is_empty() { "none" } else { other };
            Ok(StepOutcome::failure(format!("Unknown playlist action: {label}")))
        }
    }
}

async fn list_playlists(
    invoker: &ToolInvoker<'_>,
    params: &PlaylistParams,
) -> Result<StepOutcome, ExecutionError> {
    let arguments = encode(ToolKind::Playlist, params)?;
    let result = match invoker.call(ToolKind::Playlist, &arguments).await {
        Ok(result) => result,
        Err(_) => return Ok(StepOutcome::failure("Failed to get playlists")),
    };
    let Some((playlists, count)) = decode_listing(decode_payload(&result)) else {
        return Ok(StepOutcome::failure("Failed to parse playlists"));
    };
    info!(count, "Fetched playlists");
    Ok(ActionReport::new("playlist_get")
        .with_message(format!("Found {count} playlists"))
        .with_playlists(playlists)
        .into())
}

async fn list_tracks(
    invoker: &ToolInvoker<'_>,
    params: &PlaylistParams,
) -> Result<StepOutcome, ExecutionError> {
    let arguments = encode(ToolKind::Playlist, params)?;
    let result = match invoker.call(ToolKind::Playlist, &arguments).await {
        Ok(result) => result,
        Err(_) => return Ok(StepOutcome::failure("Failed to get playlist tracks")),
    };
    let Some((tracks, count)) = decode_listing(decode_payload(&result)) else {
        return Ok(StepOutcome::failure("Failed to parse playlist tracks"));
    };
    info!(count, "Fetched playlist tracks");
    Ok(ActionReport::new("playlist_get_tracks")
        .with_message(format!("Found {count} tracks in playlist"))
        .with_tracks(tracks)
        .into())
}

async fn modify(
    invoker: &ToolInvoker<'_>,
    params: &PlaylistParams,
    action: &str,
    failure_base: &str,
    message: &str,
) -> Result<StepOutcome, ExecutionError> {
    let arguments = encode(ToolKind::Playlist, params)?;
    if invoker.call(ToolKind::Playlist, &arguments).await.is_err() {
        return Ok(StepOutcome::failure(failure_base));
    }
    Ok(ActionReport::new(format!("playlist_{action}"))
        .with_message(message)
        .into())
}

/// A listing is a JSON array or object; its size is the item count
fn decode_listing(decoded: Result<Value, serde_json::Error>) -> Option<(Value, usize)> {
    let value = match decoded {
        Ok(value) => value,
        Err(err) => {
            error!(%err, "Failed to decode playlist payload");
            return None;
        }
    };
    let count = match &value {
        Value::Array(items) => items.len(),
        Value::Object(fields) => fields.len(),
        _ => return None,
    };
    Some((value, count))
}
