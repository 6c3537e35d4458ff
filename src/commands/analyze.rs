use asgard_trends::bridge::TrendBridge;
use asgard_trends::config::Config;
use asgard_trends::error::Result;

/// Produce one report locally and print it as JSON
pub async fn analyze(config: Config, pretty: bool) -> Result<()> {
    let bridge = TrendBridge::from_config(&config.analysis);
    tracing::info!(source = bridge.source_name(), "Running trend analysis");

    let report = bridge.get_trend_report().await?;

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}
