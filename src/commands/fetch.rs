use std::fmt;
use std::time::Duration;

use asgard_trends::client::{ClientConfig, ClientError, TrendsClient};
use asgard_trends::error::Result;
use asgard_trends::models::TrendReport;

/// Fetch a report from a running gateway and print a summary
pub async fn fetch(url: String, timeout_secs: u64) -> Result<()> {
    let config = ClientConfig::new(url).with_timeout(Duration::from_secs(timeout_secs));
    let client = TrendsClient::new(config)?;

    println!("Fetching trend report from {}", client.base_url());

    let report = match client.fetch_report().await {
        Ok(report) => report,
        Err(e) => {
            if let ClientError::Api {
                status,
                error,
                details,
            } = &e
            {
                println!("Request failed ({status}): {error}");
                if let Some(details) = details {
                    println!("{details}");
                }
            }
            return Err(e.into());
        }
    };

    print!("{}", ReportTable(&report));
    Ok(())
}

fn show<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Human readable table of a report
pub struct ReportTable<'a>(pub &'a TrendReport);

impl fmt::Display for ReportTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let results = &report.results;

        writeln!(f, "\nPredictive Trend Analysis")?;
        writeln!(f, "=========================")?;
        if let Some(note) = &report.note {
            writeln!(f, "Note: {note}")?;
        }

        writeln!(f, "\nData")?;
        writeln!(f, "  Data points:   {}", show(results.summary.data_point_count))?;
        writeln!(f, "  Training size: {}", show(results.summary.training_sample_count))?;
        writeln!(f, "  Test size:     {}", show(results.summary.test_sample_count))?;

        writeln!(f, "\nModel")?;
        writeln!(f, "  Slope:     {}", show(results.model_info.slope))?;
        writeln!(f, "  Intercept: {}", show(results.model_info.intercept))?;
        writeln!(f, "  MSE:       {}", show(results.model_info.mean_squared_error))?;

        writeln!(f, "\nPredictions ({})", results.predictions.len())?;
        for p in &results.predictions {
            writeln!(f, "  t={:<5} {:>10.2}", p.time_index, p.predicted_value)?;
        }

        Ok(())
    }
}
