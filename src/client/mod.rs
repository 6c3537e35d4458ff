//! Client for the predictive trends endpoint
//!
//! Fetches a [`TrendReport`] from a running gateway, the same request the
//! storefront's trends panel issues.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::gateway::TRENDS_PATH;
use crate::models::TrendReport;

// ============================================================================
// Client Configuration
// ============================================================================

/// Configuration for the trends client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway base URL
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(90),
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Error body returned by the gateway
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

// ============================================================================
// Trends Client
// ============================================================================

/// Client for fetching trend reports
pub struct TrendsClient {
    config: ClientConfig,
    http_client: Client,
}

impl TrendsClient {
    /// Create a new trends client
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Init(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch one trend report
    pub async fn fetch_report(&self) -> Result<TrendReport, ClientError> {
        let url = format!("{}{}", self.config.base_url, TRENDS_PATH);
        tracing::debug!(url = %url, "Fetching trend report");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<TrendReport>()
                .await
                .map_err(|e| ClientError::Parse(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => Err(ClientError::Api {
                status: status.as_u16(),
                error: body.error,
                details: body.details,
            }),
            Err(_) => Err(ClientError::Api {
                status: status.as_u16(),
                error: text,
                details: None,
            }),
        }
    }
}

// ============================================================================
// Client Errors
// ============================================================================

/// Client errors
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Gateway returned an error response
    #[error("HTTP error ({status}): {error}")]
    Api {
        status: u16,
        error: String,
        details: Option<String>,
    },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Whether retrying the request could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Init(_) | Self::Parse(_) => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
