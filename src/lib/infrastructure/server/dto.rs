use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommandRequest {
    /// Natural-language instruction, e.g. "play Bohemian Rhapsody"
    pub command: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfoResponse {
    pub name: String,
    pub description: String,
    pub endpoints: BTreeMap<String, String>,
    pub documentation: String,
}
