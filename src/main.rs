use clap::Parser;
use spotify_mcp_relay::Cli;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    spotify_mcp_relay::run(cli).await
}
