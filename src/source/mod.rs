//! Producers of trend reports
//!
//! A [`TrendSource`] is anything that can produce a [`TrendReport`] on demand.
//! Two implementations exist:
//!
//! - [`LiveAnalysisSource`] - runs the external analysis script and parses it
//! - [`StaticFallbackSource`] - returns a fixed payload without computation
//!
//! Which one is used is decided once, from [`SourceMode`], when the bridge is
//! built.

pub mod error;
pub mod fallback;
pub mod live;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::AnalysisConfig;
use crate::models::TrendReport;

pub use error::AnalysisError;
pub use fallback::StaticFallbackSource;
pub use live::LiveAnalysisSource;

/// Capability shared by all report producers
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Name used in logs and metric labels
    fn name(&self) -> &'static str;

    /// Produce one report
    async fn produce(&self) -> Result<TrendReport, AnalysisError>;
}

/// Deployment mode selecting the report source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Run the external analysis process
    #[default]
    Live,
    /// Serve the canned payload
    Simulated,
}

impl SourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Simulated => "simulated",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "simulated" | "static" | "fallback" => Ok(Self::Simulated),
            other => Err(format!(
                "unknown mode '{other}', expected 'live' or 'simulated'"
            )),
        }
    }
}

/// Build the source selected by `config.mode`
pub fn build_source(config: &AnalysisConfig) -> Arc<dyn TrendSource> {
    match config.mode {
        SourceMode::Live => Arc::new(LiveAnalysisSource::from_config(config)),
        SourceMode::Simulated => Arc::new(StaticFallbackSource::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("live".parse::<SourceMode>().unwrap(), SourceMode::Live);
        assert_eq!(" Simulated ".parse::<SourceMode>().unwrap(), SourceMode::Simulated);
        assert_eq!("fallback".parse::<SourceMode>().unwrap(), SourceMode::Simulated);
        assert!("production".parse::<SourceMode>().is_err());
    }

    #[test]
    fn test_build_source_follows_mode() {
        let mut config = AnalysisConfig::default();
        assert_eq!(build_source(&config).name(), "live");

        config.mode = SourceMode::Simulated;
        assert_eq!(build_source(&config).name(), "simulated");
    }
}
