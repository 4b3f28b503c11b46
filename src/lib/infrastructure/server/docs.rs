use super::dto::{CommandRequest, ErrorResponse, HealthResponse, ServiceInfoResponse};
use super::routes;
use crate::application::actions::{
    ActionFailure, ActionReport, FinalResponse, ItemKind, PartialDetails, ReportResult,
    SearchResult,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::command::command_handler,
        routes::health::health_handler,
        routes::health::root_handler
    ),
    components(
        schemas(
            CommandRequest,
            ErrorResponse,
            HealthResponse,
            ServiceInfoResponse,
            FinalResponse,
            ActionReport,
            ActionFailure,
            PartialDetails,
            ReportResult,
            SearchResult,
            ItemKind
        )
    ),
    tags(
        (name = "command", description = "Natural-language Spotify control"),
        (name = "service", description = "Health and service information")
    )
)]
pub(super) struct ApiDoc;
