//! asgard-trends - Predictive trends bridge for the Asgard Store
//!
//! Runs an external linear-regression script, extracts the model parameters
//! and forecasts it prints, and serves them as JSON.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Report data structures and their wire format
//! - [`parser`] - Line-oriented extraction of fields from script output
//! - [`source`] - Live (process-backed) and simulated report sources
//! - [`bridge`] - Single entry point producing reports from a source
//! - [`gateway`] - HTTP routes, handlers and server
//! - [`client`] - HTTP client for a running gateway
//! - [`metrics`] - Prometheus metrics
//!
//! # Example
//!
//! ```no_run
//! use asgard_trends::bridge::TrendBridge;
//! use asgard_trends::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let bridge = TrendBridge::from_config(&config.analysis);
//!     let report = bridge.get_trend_report().await?;
//!     println!("{} predictions", report.results.predictions.len());
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod source;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::bridge::TrendBridge;
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result, TrendsErrorTrait};
    pub use crate::models::{ModelInfo, Prediction, TrendReport, TrendResults, TrendSummary};
    pub use crate::source::{AnalysisError, SourceMode, TrendSource};
}

// Direct re-exports for convenience
pub use models::{ModelInfo, Prediction, TrendReport, TrendResults, TrendSummary};
