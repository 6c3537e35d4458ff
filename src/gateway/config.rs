//! Gateway configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::ServerConfig;

const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Configuration for the HTTP gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Enable CORS for API
    pub enable_cors: bool,

    /// Enable request logging
    pub enable_request_logging: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl GatewayConfig {
    /// Create a new config builder
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// Build from the `[server]` section of the main config
    ///
    /// The host may be an IP literal (`0.0.0.0`, `::`, `[::1]`) or a hostname.
    pub async fn from_server_config(server: &ServerConfig) -> Result<Self, ConfigError> {
        let bind_address = resolve_bind_address(&server.host, server.port).await?;

        Self::builder()
            .bind_address(bind_address)
            .enable_cors(server.enable_cors)
            .enable_request_logging(server.enable_request_logging)
            .build()
    }
}

/// Resolve `host` and `port` to the first socket address found
pub async fn resolve_bind_address(host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let invalid = |reason: String| ConfigError::InvalidValue {
        field: "host".to_string(),
        reason,
    };

    let mut addrs = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| invalid(format!("Cannot resolve {host}: {e}")))?;

    addrs
        .next()
        .ok_or_else(|| invalid(format!("No address found for {host}")))
}

/// Builder for GatewayConfig
#[derive(Debug, Default)]
pub struct GatewayConfigBuilder {
    bind_address: Option<SocketAddr>,
    enable_cors: Option<bool>,
    enable_request_logging: Option<bool>,
}

impl GatewayConfigBuilder {
    /// Set bind address
    pub fn bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = Some(addr);
        self
    }

    /// Enable/disable CORS
    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.enable_cors = Some(enable);
        self
    }

    /// Enable/disable request logging
    pub fn enable_request_logging(mut self, enable: bool) -> Self {
        self.enable_request_logging = Some(enable);
        self
    }

    /// Build the config
    pub fn build(self) -> Result<GatewayConfig, ConfigError> {
        let bind_address = match self.bind_address {
            Some(addr) => addr,
            None => DEFAULT_BIND.parse().map_err(|_| ConfigError::InvalidValue {
                field: "bind_address".to_string(),
                reason: format!("Invalid address: {DEFAULT_BIND}"),
            })?,
        };

        Ok(GatewayConfig {
            bind_address,
            enable_cors: self.enable_cors.unwrap_or(true),
            enable_request_logging: self.enable_request_logging.unwrap_or(true),
        })
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
