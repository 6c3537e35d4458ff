//! Gateway server implementation
//!
//! This module wires the bridge, router and middleware together and runs
//! the HTTP listener.

use std::net::SocketAddr;
use std::time::Instant;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bridge::TrendBridge;
use crate::source::SourceMode;

use super::api::create_router;
use super::config::GatewayConfig;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Report producer
    pub bridge: TrendBridge,

    /// Mode the bridge was built for
    pub mode: SourceMode,

    /// Server start time
    pub start_time: Instant,
}

// ============================================================================
// Gateway Server
// ============================================================================

/// HTTP front of the trend report bridge
pub struct TrendGateway {
    config: GatewayConfig,
    state: AppState,
}

impl TrendGateway {
    /// Create a new gateway
    pub fn new(config: GatewayConfig, bridge: TrendBridge, mode: SourceMode) -> Self {
        let state = AppState {
            bridge,
            mode,
            start_time: Instant::now(),
        };

        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        // Add CORS layer if enabled
        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        // Add tracing layer if enabled
        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), GatewayError> {
        let addr = self.config.bind_address;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(addr, e))?;

        self.serve(listener, shutdown_signal).await
    }

    /// Serve on an already bound listener
    pub async fn serve(
        &self,
        listener: TcpListener,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), GatewayError> {
        let router = self.build_router();
        let addr = listener.local_addr().map_err(GatewayError::Serve)?;

        tracing::info!(
            address = %addr,
            mode = %self.state.mode,
            source = self.state.bridge.source_name(),
            "Starting trends gateway"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(GatewayError::Serve)?;

        tracing::info!("Trends gateway shutdown complete");
        Ok(())
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            bind_address: self.config.bind_address,
            mode: self.state.mode,
            cors_enabled: self.config.enable_cors,
            request_logging_enabled: self.config.enable_request_logging,
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub mode: SourceMode,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "Trends Gateway\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Mode: {}\n\
             CORS: {}\n\
             Request Logging: {}",
            "",
            self.bind_address,
            self.mode,
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled { "enabled" } else { "disabled" }
        )
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Failed to bind to address
    #[error("Failed to bind {0}: {1}")]
    Bind(SocketAddr, #[source] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
