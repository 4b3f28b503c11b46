use super::context::ExecutionContext;
use super::errors::ExecutionError;
use super::handlers::{info, playback, playlist, queue, search};
use super::invoker::ToolInvoker;
use super::models::ToolKind;
use super::outcome::StepOutcome;
use super::params::narrow;
use serde_json::{Map, Value};
use tracing::{error, warn};

/// Route one action to the handler for its tool kind.
///
/// Unknown tool names and parameters of the wrong shape both become a failed
/// step without reaching the server.
pub async fn dispatch(
    invoker: &ToolInvoker<'_>,
    kind: &str,
    parameters: &Map<String, Value>,
    context: &ExecutionContext,
) -> Result<StepOutcome, ExecutionError> {
    let Some(tool) = ToolKind::from_tool_name(kind) else {
        error!(tool = kind, "Unsupported action");
        return Ok(StepOutcome::failure(format!("Unsupported action: {kind}")));
    };

    match tool {
        ToolKind::Search => match narrow(tool, parameters) {
            Ok(params) => search::handle(invoker, params).await,
            Err(err) => Ok(rejected(err)),
        },
        ToolKind::GetInfo => match narrow(tool, parameters) {
            Ok(params) => info::handle(invoker, params, context).await,
            Err(err) => Ok(rejected(err)),
        },
        ToolKind::Playback => match narrow(tool, parameters) {
            Ok(params) => playback::handle(invoker, params, context).await,
            Err(err) => Ok(rejected(err)),
        },
        ToolKind::Queue => match narrow(tool, parameters) {
            Ok(params) => queue::handle(invoker, params, context).await,
            Err(err) => Ok(rejected(err)),
        },
        ToolKind::Playlist => match narrow(tool, parameters) {
            Ok(params) => playlist::handle(invoker, params).await,
            Err(err) => Ok(rejected(err)),
        },
    }
}

fn rejected(err: ExecutionError) -> StepOutcome {
    warn!(%err, "Rejected action parameters");
    StepOutcome::failure(err.to_string())
}
