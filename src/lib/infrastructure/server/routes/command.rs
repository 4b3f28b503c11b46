use super::super::dto::{CommandRequest, ErrorResponse};
use super::super::state::ServerState;
use crate::application::actions::FinalResponse;
use crate::model::ModelProvider;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info};

/// Failures of the command itself are part of the 200 body as `{error}`
#[utoipa::path(
    post,
    path = "/command",
    tag = "command",
    request_body = CommandRequest,
    responses(
        (status = 200, description = "Command processed; the body is a success, partial or error response", body = FinalResponse),
        (status = 400, description = "Empty command", body = ErrorResponse)
    )
)]
pub async fn command_handler<P: ModelProvider + 'static>(
    State(state): State<Arc<ServerState<P>>>,
    Json(payload): Json<CommandRequest>,
) -> Result<Json<FinalResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(command = payload.command.as_str(), "Received /command request");

    if payload.command.trim().is_empty() {
        error!("Rejecting /command request due to empty command");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "command cannot be empty".to_string(),
            }),
        ));
    }

    let response = state.relay().handle(payload.command.trim()).await;
    Ok(Json(response))
}
