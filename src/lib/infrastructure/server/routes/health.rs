use super::super::dto::{HealthResponse, ServiceInfoResponse};
use crate::constants::SERVICE_NAME;
use axum::Json;
use std::collections::BTreeMap;

#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Service description", body = ServiceInfoResponse))
)]
pub async fn root_handler() -> Json<ServiceInfoResponse> {
    let endpoints = BTreeMap::from([
        (
            "/command".to_string(),
            "POST - Send a natural language command to control Spotify".to_string(),
        ),
        (
            "/health".to_string(),
            "GET - Check the health of the service".to_string(),
        ),
    ]);
    Json(ServiceInfoResponse {
        name: "Spotify MCP Relay".to_string(),
        description: "Natural language interface for controlling Spotify".to_string(),
        endpoints,
        documentation: "/api-doc/openapi.json".to_string(),
    })
}
