//! Trend report bridge
//!
//! The bridge is the single entry point used by the HTTP layer and the CLI.
//! It owns the report source chosen at construction time, records metrics and
//! optionally caps how many analysis runs may be in flight at once.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

use crate::config::AnalysisConfig;
use crate::metrics;
use crate::models::TrendReport;
use crate::source::{build_source, AnalysisError, SourceMode, TrendSource};

/// Produces trend reports from a configured source
#[derive(Clone)]
pub struct TrendBridge {
    source: Arc<dyn TrendSource>,
    limiter: Option<Arc<Semaphore>>,
}

impl TrendBridge {
    /// Build a bridge over the source selected by `config.mode`
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let bridge = Self::new(build_source(config));
        match config.max_concurrent_runs {
            Some(limit) if config.mode == SourceMode::Live => bridge.with_concurrency_limit(limit),
            _ => bridge,
        }
    }

    /// Build a bridge over an explicit source
    pub fn new(source: Arc<dyn TrendSource>) -> Self {
        Self {
            source,
            limiter: None,
        }
    }

    /// Allow at most `limit` concurrent runs; further callers wait
    #[must_use]
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.limiter = Some(Arc::new(Semaphore::new(limit)));
        self
    }

    /// Name of the underlying source
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Produce one report
    pub async fn get_trend_report(&self) -> Result<TrendReport, AnalysisError> {
        let _permit = match &self.limiter {
            Some(limiter) => Some(
                limiter
                    .clone()
                    .acquire_owned()
                    .await
                    .map_err(|_| AnalysisError::Unavailable)?,
            ),
            None => None,
        };

        let source = self.source.name();
        let started = Instant::now();
        let result = self.source.produce().await;
        let elapsed = started.elapsed();

        match &result {
            Ok(report) => {
                tracing::info!(
                    source,
                    predictions = report.results.predictions.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Trend report produced"
                );
                metrics::record_analysis(source, "success", elapsed.as_secs_f64());
            }
            Err(e) => {
                tracing::error!(
                    source,
                    kind = e.kind(),
                    error = %e,
                    "Trend report failed"
                );
                metrics::record_analysis(source, e.kind(), elapsed.as_secs_f64());
            }
        }

        result
    }
}

impl std::fmt::Debug for TrendBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrendBridge")
            .field("source", &self.source.name())
            .field("limited", &self.limiter.is_some())
            .finish()
    }
}
