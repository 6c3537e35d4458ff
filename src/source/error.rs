//! Errors raised while producing a trend report

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running the analysis process
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The configured script does not exist
    #[error("Analysis script not found: {}", path.display())]
    ScriptNotFound { path: PathBuf },

    /// The interpreter could not be started
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A pipe to the child process could not be read
    #[error("Failed to read {stream}: {source}")]
    Read {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully
    #[error("Analysis process exited with {}", describe_status(*status))]
    Failed {
        /// Exit code, `None` when terminated by a signal
        status: Option<i32>,
        stderr: String,
    },

    /// The process did not finish before its deadline
    #[error("Analysis timed out after {}s", timeout.as_secs_f64())]
    Timeout { timeout: Duration },

    /// A stream exceeded the configured byte bound
    #[error("Analysis {stream} exceeded {limit} bytes")]
    OutputTooLarge { stream: &'static str, limit: usize },

    /// The concurrency gate was closed
    #[error("Analysis capacity unavailable")]
    Unavailable,
}

fn describe_status(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl AnalysisError {
    /// Diagnostic text suitable for a `details` field
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Failed { stderr, .. } => Some(stderr.clone()),
            Self::ScriptNotFound { .. }
            | Self::Launch { .. }
            | Self::Read { .. }
            | Self::Timeout { .. }
            | Self::OutputTooLarge { .. } => Some(self.to_string()),
            Self::Unavailable => None,
        }
    }

    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ScriptNotFound { .. } => "script_not_found",
            Self::Launch { .. } => "launch",
            Self::Read { .. } => "read",
            Self::Failed { .. } => "failed",
            Self::Timeout { .. } => "timeout",
            Self::OutputTooLarge { .. } => "output_too_large",
            Self::Unavailable => "unavailable",
        }
    }
}
