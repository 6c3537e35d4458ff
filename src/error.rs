//! Unified error handling for the asgard-trends crate
//!
//! This module provides a unified error type that consolidates all domain-specific
//! errors into a single `Error` enum, while maintaining the ability to use
//! domain-specific errors when needed.
//!
//! # Architecture
//!
//! - [`TrendsErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors

use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::client::ClientError;
pub use crate::source::AnalysisError;

/// Common trait for the crate's error types
pub trait TrendsErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// External analysis process errors (launch, exit, deadline)
    Process,
    /// Network-related errors (HTTP client)
    Network,
    /// Parsing and serialization errors
    Parsing,
    /// Configuration and validation errors
    Config,
}

impl ErrorCategory {
    /// Human readable name of the category
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Process => "analysis process error",
            Self::Network => "network error",
            Self::Parsing => "parsing error",
            Self::Config => "configuration error",
        }
    }
}

impl TrendsErrorTrait for AnalysisError {
    fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Unavailable | Self::Read { .. }
        )
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Process
    }
}

impl TrendsErrorTrait for ClientError {
    fn is_recoverable(&self) -> bool {
        ClientError::is_recoverable(self)
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse(_) => ErrorCategory::Parsing,
            Self::Init(_) => ErrorCategory::Config,
            Self::Network(_) | Self::Api { .. } => ErrorCategory::Network,
        }
    }
}

/// Unified error type for the asgard-trends crate
#[derive(Error, Debug)]
pub enum Error {
    /// Analysis process errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Trends client errors
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrendsErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Analysis(e) => TrendsErrorTrait::is_recoverable(e),
            Self::Client(e) => TrendsErrorTrait::is_recoverable(e),
            Self::Json(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Analysis(e) => e.category(),
            Self::Client(e) => e.category(),
            Self::Json(_) => ErrorCategory::Parsing,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
