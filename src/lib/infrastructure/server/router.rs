use super::docs::ApiDoc;
use super::error::ServerError;
use super::routes;
use super::state::ServerState;
use crate::application::relay::CommandRelay;
use crate::model::ModelProvider;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;

pub(super) fn build<P>(relay: Arc<CommandRelay<P>>) -> Router
where
    P: ModelProvider + 'static,
{
    let api = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let state = Arc::new(ServerState::new(relay));
    Router::new()
        .route("/", get(routes::health::root_handler))
        .route("/health", get(routes::health::health_handler))
        .route("/command", post(routes::command::command_handler::<P>))
        .route(
            "/api-doc/openapi.json",
            get(move || {
                let api = api.clone();
                async move { Json(api) }
            }),
        )
        .layer(cors)
        .with_state(state)
}

pub(super) async fn serve<P>(
    relay: Arc<CommandRelay<P>>,
    addr: SocketAddr,
) -> Result<(), ServerError>
where
    P: ModelProvider + 'static,
{
    info!(%addr, "Binding REST server");
    let app = build(relay);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "REST server ready to accept connections");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(err) => {
            warn!(%err, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
