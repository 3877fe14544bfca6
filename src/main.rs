//! provider-watch monitor binary
//!
//! Loads the monitor configuration, starts the scheduled health and
//! availability loops, and dumps a final health report on shutdown.

use clap::Parser;
use provider_watch::config::MonitorConfig;
use provider_watch::monitoring::PerformanceMonitor;
use provider_watch::utils::logging;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "monitor", version, about = "Health monitor for LLM inference backends")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "MONITOR_CONFIG", default_value = "config/monitor.yaml")]
    config: PathBuf,

    /// Emit logs as structured JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.json_logs);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> provider_watch::Result<()> {
    let config = MonitorConfig::from_file(&args.config)?;
    info!(
        "Monitoring {} provider(s) every {}s",
        config.providers.len(),
        config.monitoring.check_interval_secs
    );

    let monitor = PerformanceMonitor::from_config(&config)?;
    monitor.start();

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");

    let report = monitor.export_health_report().await;
    monitor.stop().await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
