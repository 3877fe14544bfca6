//! # provider-watch
//!
//! Health and performance monitoring for LLM inference backends.
//!
//! Tracks the operational state of Ollama-compatible inference servers
//! (LMDeploy for batching throughput, vLLM for local single-instance
//! serving): aggregates per-operation metrics into rolling statistics, runs
//! periodic multi-stage health probes, classifies provider and system-wide
//! health, and raises severity-tagged alerts with bounded in-memory history.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use provider_watch::config::MonitorConfig;
//! use provider_watch::monitoring::PerformanceMonitor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MonitorConfig::from_file("config/monitor.yaml")?;
//!     let monitor = PerformanceMonitor::from_config(&config)?;
//!
//!     monitor.start();
//!     let health = monitor.get_system_health().await;
//!     println!("overall: {}", health.overall);
//!     monitor.stop().await;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod monitoring;
pub mod utils;

// Re-export main types
pub use config::MonitorConfig;
pub use core::collaborators::{OptimizerCollaborator, OptimizerInsights, RouterCollaborator};
pub use core::providers::{LmdeployProvider, ProviderClient, VllmProvider};
pub use monitoring::{
    AlertSeverity, HealthAlert, MetricRecord, PerformanceInsights, PerformanceMonitor,
    ProviderStats, ServiceHealth, ServiceStatus, SystemHealth, SystemStatus,
};
pub use utils::error::{MonitorError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, env!("CARGO_PKG_NAME"));
    }
}
