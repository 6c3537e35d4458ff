//! HTTP gateway for the trend report bridge
//!
//! # Routes
//!
//! ```text
//! GET  /                        service description
//! GET  /health                  liveness and uptime
//! GET  /metrics                 Prometheus exposition
//! GET  /api/predictive-trends   trend report (any other method, HEAD included: 405)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use asgard_trends::bridge::TrendBridge;
//! use asgard_trends::gateway::{GatewayConfig, TrendGateway};
//!
//! let gateway_config = GatewayConfig::from_server_config(&config.server).await?;
//! let bridge = TrendBridge::from_config(&config.analysis);
//! let gateway = TrendGateway::new(gateway_config, bridge, config.analysis.mode);
//! gateway.start_with_shutdown(shutdown_signal()).await?;
//! ```

pub mod api;
pub mod config;
pub mod server;

// Re-export main types
pub use api::{ErrorResponse, TRENDS_PATH};
pub use config::GatewayConfig;
pub use server::{AppState, GatewayError, TrendGateway};
