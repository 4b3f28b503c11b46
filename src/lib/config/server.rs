use super::error::ConfigError;
use crate::constants::{
    DEFAULT_BIND, DEFAULT_MCP_ENDPOINT, DEFAULT_MCP_SERVER_URL, DEFAULT_MCP_TIMEOUT_SECS,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

/// Where the Spotify MCP server lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpServerConfig {
    pub url: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl McpServerConfig {
    /// Full URL of the streamable HTTP endpoint
    pub fn endpoint_url(&self) -> String {
        let base = self.url.trim_end_matches('/');
        let path = self.endpoint.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for McpServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_MCP_SERVER_URL.to_string(),
            endpoint: DEFAULT_MCP_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_MCP_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawMcpServer {
    url: Option<String>,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
}

impl From<RawMcpServer> for McpServerConfig {
    fn from(raw: RawMcpServer) -> Self {
        let defaults = McpServerConfig::default();
        Self {
            url: raw.url.map(|url| expand(&url)).unwrap_or(defaults.url),
            endpoint: raw.endpoint.unwrap_or(defaults.endpoint),
            timeout_secs: raw.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}

/// REST front end settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestServerConfig {
    pub bind: String,
}

impl Default for RestServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl RestServerConfig {
    /// Replace the port of the bind address, keeping the host
    pub fn with_port(&self, port: u16) -> Self {
        let host = match self.bind.rsplit_once(':') {
            Some((host, _)) => host,
            None => self.bind.as_str(),
        };
        Self {
            bind: format!("{host}:{port}"),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.parse().map_err(|_| ConfigError::InvalidBind {
            bind: self.bind.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawRestServer {
    bind: Option<String>,
}

impl From<RawRestServer> for RestServerConfig {
    fn from(raw: RawRestServer) -> Self {
        Self {
            bind: raw.bind.unwrap_or_else(|| DEFAULT_BIND.to_string()),
        }
    }
}

pub(crate) fn expand(value: &str) -> String {
    try_expand(value).unwrap_or_else(|| value.to_string())
}

/// `None` when a referenced variable is unset
pub(crate) fn try_expand(value: &str) -> Option<String> {
    shellexpand::full(value).ok().map(|cow| cow.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn joins_url_and_endpoint_without_double_slash() {
        let config = McpServerConfig {
            url: "http://localhost:8080/".into(),
            endpoint: "/mcp".into(),
            timeout_secs: 5,
        };
        assert_eq!(config.endpoint_url(), "http://localhost:8080/mcp");
    }

    #[test]
    fn empty_endpoint_uses_bare_url() {
        let config = McpServerConfig {
            url: "http://localhost:8080".into(),
            endpoint: String::new(),
            timeout_secs: 5,
        };
        assert_eq!(config.endpoint_url(), "http://localhost:8080");
    }

    #[test]
    fn with_port_keeps_host() {
        let rest = RestServerConfig {
            bind: "127.0.0.1:8090".into(),
        };
        assert_eq!(rest.with_port(9000).bind, "127.0.0.1:9000");
    }

    #[test]
    fn expands_env_vars_in_server_url() {
        unsafe {
            env::set_var("TEST_RELAY_MCP_HOST", "spotify-mcp.internal");
        }

        let raw = RawMcpServer {
            url: Some("http://${TEST_RELAY_MCP_HOST}:8080".into()),
            endpoint: None,
            timeout_secs: None,
        };
        let config = McpServerConfig::from(raw);
        assert_eq!(config.url, "http://spotify-mcp.internal:8080");
        assert_eq!(config.endpoint, DEFAULT_MCP_ENDPOINT);

        unsafe {
            env::remove_var("TEST_RELAY_MCP_HOST");
        }
    }
}
