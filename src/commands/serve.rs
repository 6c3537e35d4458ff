use anyhow::{Context, Result};

use asgard_trends::bridge::TrendBridge;
use asgard_trends::config::Config;
use asgard_trends::gateway::{GatewayConfig, TrendGateway, TRENDS_PATH};
use asgard_trends::metrics;

/// Command-line overrides for the gateway
pub struct ServeParams {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub disable_cors: bool,
}

/// Start the trends gateway
pub async fn serve(mut config: Config, params: ServeParams) -> Result<()> {
    let ServeParams {
        host,
        port,
        disable_cors,
    } = params;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if disable_cors {
        config.server.enable_cors = false;
    }
    config.validate().context("Invalid configuration")?;

    if let Err(e) = metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics initialization failed, continuing without metrics");
    }

    let gateway_config = GatewayConfig::from_server_config(&config.server)
        .await
        .context("Invalid server address")?;
    let bridge = TrendBridge::from_config(&config.analysis);
    let gateway = TrendGateway::new(gateway_config, bridge, config.analysis.mode);

    println!("{}", gateway.info().display());
    if config.analysis.mode.is_live() {
        println!(
            "Analysis: {} {} (timeout {}s, max output {} bytes)",
            config.analysis.interpreter,
            config.analysis.script_path.display(),
            config.analysis.timeout_secs,
            config.analysis.max_output_bytes
        );
    }
    println!();
    println!("API Endpoints:");
    println!("  GET  /         - Service description");
    println!("  GET  /health   - Health check");
    println!("  GET  /metrics  - Prometheus metrics endpoint");
    println!("  GET  {TRENDS_PATH} - Predictive trend report");
    println!();
    println!("Press Ctrl+C to stop.\n");

    gateway
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    println!("Trends gateway stopped.");
    Ok(())
}
