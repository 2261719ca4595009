//! Server configuration from command-line flags and environment variables.

use clap::Parser;
use std::net::{SocketAddr, ToSocketAddrs};
use tracing::Level;

/// HTTP reflector and black hole
#[derive(Parser, Debug, Clone)]
#[command(name = "albedo")]
#[command(author, version, about = "HTTP reflector and black hole")]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "ALBEDO_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, env = "ALBEDO_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Log debugging information
    #[arg(long, env = "ALBEDO_DEBUG")]
    pub debug: bool,

    /// Use JSON log format instead of text
    #[arg(long, env = "ALBEDO_JSON_LOGS")]
    pub json: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub log_level: Level,
    pub log_format: LogFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, String),
}

impl TryFrom<&Cli> for ServerConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let addr = (cli.bind.as_str(), cli.port)
            .to_socket_addrs()
            .map_err(|e| ConfigError::InvalidBindAddress(cli.bind.clone(), e.to_string()))?
            .next()
            .ok_or_else(|| {
                ConfigError::InvalidBindAddress(cli.bind.clone(), "no address resolved".into())
            })?;

        Ok(Self {
            addr,
            log_level: if cli.debug { Level::DEBUG } else { Level::INFO },
            log_format: if cli.json {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
        })
    }
}
