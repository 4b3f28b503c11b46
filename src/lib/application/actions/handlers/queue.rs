use crate::application::actions::context::ExecutionContext;
use crate::application::actions::errors::ExecutionError;
use crate::application::actions::invoker::ToolInvoker;
use crate::application::actions::models::ToolKind;
use crate::application::actions::outcome::{ActionReport, StepOutcome};
use crate::application::actions::params::{QueueParams, encode, present};
use tracing::info;

pub const NO_TRACK: &str = "No track ID available for queue";
pub const QUEUE_FAILURE: &str = "Failed to add to queue";

pub async fn handle(
    invoker: &ToolInvoker<'_>,
    mut params: QueueParams,
    context: &ExecutionContext,
) -> Result<StepOutcome, ExecutionError> {
    let last_hit = context.last_search_result();

    if present(&params.track_id).is_none() {
        let Some(hit) = last_hit else {
            return Ok(StepOutcome::failure(NO_TRACK));
        };
        info!(uri = %hit.uri, "Queueing item from last search");
        params.track_id = Some(hit.uri.clone());
    }

    let arguments = encode(ToolKind::Queue, &params)?;
    if let Err(failure) = invoker.call(ToolKind::Queue, &arguments).await {
        return Ok(StepOutcome::failure(failure.message(QUEUE_FAILURE)));
    }

    let report = match last_hit {
        Some(hit) => ActionReport::new("queue")
            .with_message(format!("Added {} to queue", hit.describe()))
            .with_item(hit.clone()),
        None => ActionReport::new("queue").with_message("Added item to queue"),
    };
    Ok(report.into())
}
