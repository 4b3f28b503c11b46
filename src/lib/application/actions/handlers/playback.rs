use crate::application::actions::context::ExecutionContext;
use crate::application::actions::errors::ExecutionError;
use crate::application::actions::invoker::ToolInvoker;
use crate::application::actions::models::ToolKind;
use crate::application::actions::outcome::{ActionReport, StepOutcome};
use crate::application::actions::params::{PlaybackParams, encode, present};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaybackCommand<'a> {
    Start,
    Pause,
    Skip,
    Other(&'a str),
}

impl<'a> PlaybackCommand<'a> {
    fn parse(action: &'a str) -> Self {
        match action {
            "start" => PlaybackCommand::Start,
            "pause" => PlaybackCommand::Pause,
            "skip" => PlaybackCommand::Skip,
            other => PlaybackCommand::Other(other),
        }
    }
}

pub async fn handle(
    invoker: &ToolInvoker<'_>,
    mut params: PlaybackParams,
    context: &ExecutionContext,
) -> Result<StepOutcome, ExecutionError> {
    let action = params.action.clone().unwrap_or_default();
    let command = PlaybackCommand::parse(action.trim());
    let last_hit = context.last_search_result();

    if command == PlaybackCommand::Start && present(&params.spotify_uri).is_none() {
        match last_hit {
            Some(hit) => {
                let uri = hit.playable_uri();
                info!(%uri, "Using URI from last search");
                params.spotify_uri = Some(uri);
            }
            None => info!("No URI provided for start action, resuming current playback"),
        }
    }

    let arguments = encode(ToolKind::Playback, &params)?;
    if let Err(failure) = invoker.call(ToolKind::Playback, &arguments).await {
        let label = if action.is_empty() { "none" } else { action.as_str() };
        return Ok(StepOutcome::failure(
            failure.message(&format!("Playback action failed: {label}")),
        ));
    }

    let report = ActionReport::new("playback");
    let report = match command {
        PlaybackCommand::Start => match last_hit {
            Some(hit) => report
                .with_type("start")
                .with_message(format!("Playing {}", hit.describe()))
                .with_item(hit.clone()),
            None => report.with_type("resume").with_message("Resuming playback"),
        },
        PlaybackCommand::Pause => report.with_type("pause").with_message("Playback paused"),
        PlaybackCommand::Skip => report.with_type("skip").with_message("Skipped to next track"),
        PlaybackCommand::Other(other) => report
            .with_type(other)
            .with_message("Playback command executed"),
    };
    Ok(report.into())
}
