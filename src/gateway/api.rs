//! REST API handlers for the gateway
//!
//! This module defines the API routes and handlers that expose the trend
//! report bridge over HTTP.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::metrics;
use crate::source::AnalysisError;

use super::server::AppState;

/// Path of the predictive trends endpoint
pub const TRENDS_PATH: &str = "/api/predictive-trends";

// Error messages are shown verbatim by the storefront, which is in Spanish.
pub const ANALYSIS_FAILED: &str = "Error ejecutando el análisis predictivo";
pub const ANALYSIS_TIMED_OUT: &str = "El análisis predictivo excedió el tiempo límite";
pub const OUTPUT_TOO_LARGE: &str = "La salida del análisis predictivo es demasiado grande";
pub const ANALYSIS_UNAVAILABLE: &str = "Análisis predictivo no disponible";
pub const INTERNAL_ERROR: &str = "Error interno del servidor";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

// ============================================================================
// API Response Types
// ============================================================================

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            details: None,
        }
    }

    pub fn with_details(message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            error: message.into(),
            details,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub mode: String,
    pub uptime_secs: u64,
    pub timestamp: String,
}

/// Map an analysis failure to its HTTP status and body
pub fn error_response(err: &AnalysisError) -> (StatusCode, ErrorResponse) {
    let (status, message) = match err {
        AnalysisError::Failed { .. } => (StatusCode::INTERNAL_SERVER_ERROR, ANALYSIS_FAILED),
        AnalysisError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, ANALYSIS_TIMED_OUT),
        AnalysisError::OutputTooLarge { .. } => (StatusCode::BAD_GATEWAY, OUTPUT_TOO_LARGE),
        AnalysisError::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, ANALYSIS_UNAVAILABLE),
        AnalysisError::ScriptNotFound { .. }
        | AnalysisError::Launch { .. }
        | AnalysisError::Read { .. } => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR),
    };

    (status, ErrorResponse::with_details(message, err.details()))
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route(
            TRENDS_PATH,
            get(predictive_trends)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Root handler - service description
async fn root_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "Asgard Store predictive trends",
        "version": env!("CARGO_PKG_VERSION"),
        "mode": state.mode.as_str(),
        "endpoints": {
            "trends": format!("GET {TRENDS_PATH}"),
            "health": "GET /health",
            "metrics": "GET /metrics"
        }
    }))
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mode: state.mode.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Prometheus scrape endpoint
async fn metrics_handler() -> Response {
    match metrics::encode_metrics() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Produce one trend report
async fn predictive_trends(State(state): State<AppState>) -> Response {
    match state.bridge.get_trend_report().await {
        Ok(report) => {
            metrics::record_request("success");
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            metrics::record_request(e.kind());
            let (status, body) = error_response(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// Any method other than GET on the trends endpoint, HEAD included
async fn method_not_allowed() -> Response {
    metrics::record_request("method_not_allowed");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET")],
        Json(ErrorResponse::new(METHOD_NOT_ALLOWED)),
    )
        .into_response()
}

// ============================================================================
// Tests
// ============================================================================
