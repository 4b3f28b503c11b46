mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use error::ServerError;

use crate::application::relay::CommandRelay;
use crate::model::ModelProvider;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;

pub async fn serve<P>(relay: Arc<CommandRelay<P>>, addr: SocketAddr) -> Result<(), ServerError>
where
    P: ModelProvider + 'static,
{
    router::serve(relay, addr).await
}

/// The application router without a listener attached
pub fn router<P>(relay: Arc<CommandRelay<P>>) -> Router
where
    P: ModelProvider + 'static,
{
    router::build(relay)
}
