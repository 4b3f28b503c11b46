use std::net::SocketAddr;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "spotify-relay",
    version,
    about = "Control Spotify in natural language through an MCP server"
)]
pub struct Cli {
    /// Configuration file (defaults to config/client.toml when present)
    #[arg(long)]
    pub config: Option<String>,
    /// REST bind address, overrides the configured one
    #[arg(long)]
    pub addr: Option<SocketAddr>,
    /// Relay a single command, print the response as JSON and exit
    #[arg(long)]
    pub command: Option<String>,
}
