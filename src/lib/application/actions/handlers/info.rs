use super::decode_payload;
use crate::application::actions::context::ExecutionContext;
use crate::application::actions::errors::ExecutionError;
use crate::application::actions::invoker::ToolInvoker;
use crate::application::actions::models::ToolKind;
use crate::application::actions::outcome::{ActionReport, ReportResult, StepOutcome};
use crate::application::actions::params::{GetInfoParams, encode, present};
use serde_json::Value;
use tracing::{error, info};

pub const LOOKUP_FAILURE: &str = "Failed to get album tracks";
pub const NO_TRACKS: &str = "No tracks found in album";
pub const PARSE_FAILURE: &str = "Failed to parse album information";

pub async fn handle(
    invoker: &ToolInvoker<'_>,
    mut params: GetInfoParams,
    context: &ExecutionContext,
) -> Result<StepOutcome, ExecutionError> {
    if present(&params.item_uri).is_none() {
        if let Some(hit) = context.last_search_result() {
            info!(uri = %hit.uri, "Using URI from last search");
            params.item_uri = Some(hit.uri.clone());
        }
    }

    let arguments = encode(ToolKind::GetInfo, &params)?;
    let result = match invoker.call(ToolKind::GetInfo, &arguments).await {
        Ok(result) => result,
        Err(_) => return Ok(StepOutcome::failure(LOOKUP_FAILURE)),
    };

    let data = match decode_payload(&result) {
        Ok(data) => data,
        Err(err) => {
            error!(%err, "Failed to decode album payload");
            return Ok(StepOutcome::failure(PARSE_FAILURE));
        }
    };

    let track_count = data
        .get("tracks")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or_default();
    if track_count == 0 {
        return Ok(StepOutcome::failure(NO_TRACKS));
    }

    info!(track_count, "Album information loaded");
    Ok(ActionReport::new("get_info")
        .with_result(ReportResult::Payload(data))
        .into())
}
