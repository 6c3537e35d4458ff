//! Configuration management for the trends bridge
//!
//! This module handles loading and validating configuration from environment variables,
//! TOML files, and command-line overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::source::SourceMode;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analysis process configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How trend reports are produced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Live process or canned payload
    pub mode: SourceMode,

    /// Executable that runs the script
    pub interpreter: String,

    /// Script path, relative paths resolve against the working directory
    pub script_path: PathBuf,

    /// Deadline for one analysis run in seconds
    pub timeout_secs: u64,

    /// Byte bound applied to each of stdout and stderr
    pub max_output_bytes: usize,

    /// Maximum analysis runs in flight, unlimited when unset
    pub max_concurrent_runs: Option<usize>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Enable permissive CORS
    pub enable_cors: bool,

    /// Enable per-request tracing
    pub enable_request_logging: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::Live,
            interpreter: String::from("python"),
            script_path: PathBuf::from("scripts/predictive_trends.py"),
            timeout_secs: 60,
            max_output_bytes: 1024 * 1024,
            max_concurrent_runs: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3000,
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl AnalysisConfig {
    /// Get analysis deadline as Duration
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// `ASGARD_TRENDS_MODE` selects the source explicitly. When it is unset,
    /// `ASGARD_ENV=production` selects the simulated source.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let mode = match std::env::var("ASGARD_TRENDS_MODE") {
            Ok(value) => value
                .parse::<SourceMode>()
                .map_err(anyhow::Error::msg)
                .context("Invalid ASGARD_TRENDS_MODE")?,
            Err(_) => match std::env::var("ASGARD_ENV").as_deref() {
                Ok("production") => SourceMode::Simulated,
                _ => SourceMode::Live,
            },
        };

        let interpreter =
            std::env::var("ASGARD_INTERPRETER").unwrap_or(defaults.analysis.interpreter);

        let script_path = std::env::var("ASGARD_SCRIPT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.analysis.script_path);

        let timeout_secs = std::env::var("ASGARD_ANALYSIS_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.analysis.timeout_secs);

        let max_output_bytes = std::env::var("ASGARD_MAX_OUTPUT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.analysis.max_output_bytes);

        let max_concurrent_runs = std::env::var("ASGARD_MAX_CONCURRENT_RUNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());

        let host = std::env::var("ASGARD_HOST").unwrap_or(defaults.server.host);

        let port = std::env::var("ASGARD_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults.server.port);

        let log_level = std::env::var("ASGARD_LOG_LEVEL").unwrap_or(defaults.logging.level);

        let log_format = std::env::var("ASGARD_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            analysis: AnalysisConfig {
                mode,
                interpreter,
                script_path,
                timeout_secs,
                max_output_bytes,
                max_concurrent_runs,
            },
            server: ServerConfig {
                host,
                port,
                ..defaults.server
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.analysis.mode == SourceMode::Live {
            if self.analysis.interpreter.trim().is_empty() {
                anyhow::bail!("interpreter must not be empty");
            }

            if self.analysis.script_path.as_os_str().is_empty() {
                anyhow::bail!("script_path must not be empty");
            }
        }

        if self.analysis.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }

        if self.analysis.max_output_bytes == 0 {
            anyhow::bail!("max_output_bytes must be greater than 0");
        }

        if self.analysis.max_concurrent_runs == Some(0) {
            anyhow::bail!("max_concurrent_runs must be greater than 0 when set");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be 'text' or 'json'");
        }

        Ok(())
    }
}
