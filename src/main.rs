use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asgard_trends::config::Config;
use asgard_trends::error::{Error, TrendsErrorTrait};
use asgard_trends::source::SourceMode;

mod commands;

#[derive(Parser)]
#[command(
    name = "asgard-trends",
    version,
    about = "Predictive trends bridge for the Asgard Store",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (defaults to environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

/// Overrides for the analysis section
#[derive(clap::Args)]
struct AnalysisArgs {
    /// Report source (live, simulated)
    #[arg(short, long)]
    mode: Option<SourceMode>,

    /// Interpreter used to run the script
    #[arg(long)]
    interpreter: Option<String>,

    /// Path to the analysis script
    #[arg(long)]
    script: Option<PathBuf>,

    /// Analysis deadline in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the predictive trends API
    Serve {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(short, long)]
        port: Option<u16>,

        /// Disable CORS headers
        #[arg(long, default_value = "false")]
        no_cors: bool,
    },

    /// Produce one report locally and print it as JSON
    Analyze {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Pretty-print the JSON
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Fetch a report from a running server
    Fetch {
        /// Server base URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,

        /// Request timeout in seconds
        #[arg(long, default_value = "90")]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    tracing::info!("asgard-trends starting");

    match cli.command {
        Commands::Serve {
            analysis,
            host,
            port,
            no_cors,
        } => {
            apply_analysis_args(&mut config, analysis);
            tracing::info!(
                mode = %config.analysis.mode,
                host = ?host,
                port = ?port,
                no_cors = %no_cors,
                "Starting serve command"
            );
            commands::serve(
                config,
                commands::ServeParams {
                    host,
                    port,
                    disable_cors: no_cors,
                },
            )
            .await?;
        }

        Commands::Analyze { analysis, pretty } => {
            apply_analysis_args(&mut config, analysis);
            config.validate().context("Invalid configuration")?;
            tracing::info!(
                mode = %config.analysis.mode,
                pretty = %pretty,
                "Starting analyze command"
            );
            commands::analyze(config, pretty)
                .await
                .inspect_err(log_failure)?;
        }

        Commands::Fetch { url, timeout } => {
            tracing::info!(url = %url, timeout = %timeout, "Starting fetch command");
            commands::fetch(url, timeout)
                .await
                .inspect_err(log_failure)?;
        }
    }

    tracing::info!("asgard-trends completed successfully");
    Ok(())
}

fn apply_analysis_args(config: &mut Config, args: AnalysisArgs) {
    if let Some(mode) = args.mode {
        config.analysis.mode = mode;
    }
    if let Some(interpreter) = args.interpreter {
        config.analysis.interpreter = interpreter;
    }
    if let Some(script) = args.script {
        config.analysis.script_path = script;
    }
    if let Some(timeout) = args.timeout {
        config.analysis.timeout_secs = timeout;
    }
}

fn log_failure(err: &Error) {
    tracing::error!(
        category = err.category().describe(),
        recoverable = err.is_recoverable(),
        error = %err,
        "Command failed"
    );
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("asgard_trends=debug,tower_http=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("asgard_trends={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
