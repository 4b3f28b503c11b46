pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{actions, interpreter, relay, tooling};
pub use cli::Cli;
pub use config::AppConfig;
pub use domain::types;
pub use infrastructure::{model, server};

use actions::SequenceExecutor;
use interpreter::CommandInterpreter;
use model::OpenAIClient;
use relay::CommandRelay;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tooling::HttpConnector;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing();
    info!("Starting spotify-relay");
    debug!(config = ?cli.config, addr = ?cli.addr, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let config = AppConfig::load(config_path)?;
    debug!(
        mcp = %config.mcp.endpoint_url(),
        model = %config.model.model,
        max_attempts = config.retry.max_attempts,
        "Configuration loaded"
    );

    let relay = Arc::new(build_relay(&config));

    match cli.command {
        Some(command) => {
            info!("Relaying single command from CLI");
            let response = relay.handle(command.trim()).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        None => {
            let addr = match cli.addr {
                Some(addr) => addr,
                None => config.rest.socket_addr()?,
            };
            info!(%addr, mcp = %config.mcp.endpoint_url(), "Starting REST server");
            server::serve(relay, addr).await?;
        }
    }
    info!("Relay finished");
    Ok(())
}

/// Wire the OpenAI interpreter, HTTP connector and executor from configuration
pub fn build_relay(config: &AppConfig) -> CommandRelay<OpenAIClient> {
    let interpreter = CommandInterpreter::new(
        OpenAIClient::from_config(&config.model),
        config.model.clone(),
    );
    let connector = Arc::new(HttpConnector::new(config.mcp.clone()));
    let executor = SequenceExecutor::new(config.retry.policy());
    CommandRelay::new(interpreter, connector, executor)
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
