//! Configuration data models

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_timeout_secs() -> u64 {
    30
}

fn default_model() -> String {
    "default".to_string()
}

fn default_check_interval_secs() -> u64 {
    60
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_max_metric_history() -> usize {
    1000
}

fn default_max_alert_history() -> usize {
    100
}

fn default_latency_warning_ms() -> u64 {
    2000
}

fn default_latency_error_ms() -> u64 {
    5000
}

fn default_success_rate_warning() -> f64 {
    0.9
}

fn default_success_rate_error() -> f64 {
    0.7
}

/// Top-level monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonitorConfig {
    /// Provider endpoints to monitor, in rollup order
    #[serde(default)]
    pub providers: Vec<ProviderEndpoint>,
    /// Monitoring behavior
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

/// Which backend implementation a provider endpoint runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// High-throughput batching inference server
    Lmdeploy,
    /// Local single-instance inference server
    Vllm,
}

/// One monitored provider endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    /// Unique provider identifier used in metrics and alerts
    pub id: String,
    /// Backend implementation
    pub kind: ProviderKind,
    /// Base URL of the server, e.g. `http://localhost:11434`
    pub base_url: String,
    /// Model name used for synthetic generation probes
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderEndpoint {
    /// HTTP timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Monitoring behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Interval between full health-check cycles, in seconds
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    /// Interval between lightweight availability polls, in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Maximum retained metric snapshots
    #[serde(default = "default_max_metric_history")]
    pub max_metric_history: usize,
    /// Maximum retained alerts
    #[serde(default = "default_max_alert_history")]
    pub max_alert_history: usize,
    /// Alert thresholds
    #[serde(default)]
    pub thresholds: AlertThresholds,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            max_metric_history: default_max_metric_history(),
            max_alert_history: default_max_alert_history(),
            thresholds: AlertThresholds::default(),
        }
    }
}

impl MonitoringConfig {
    /// Health-check cycle interval as a [`Duration`]
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    /// Availability poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Thresholds driving alert emission from recorded metrics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Latency above this raises a warning alert, in milliseconds
    #[serde(default = "default_latency_warning_ms")]
    pub latency_warning_ms: u64,
    /// Latency above this raises an error alert, in milliseconds
    #[serde(default = "default_latency_error_ms")]
    pub latency_error_ms: u64,
    /// Rolling-window success rate below this raises a warning alert
    #[serde(default = "default_success_rate_warning")]
    pub success_rate_warning: f64,
    /// Rolling-window success rate below this raises an error alert
    #[serde(default = "default_success_rate_error")]
    pub success_rate_error: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            latency_warning_ms: default_latency_warning_ms(),
            latency_error_ms: default_latency_error_ms(),
            success_rate_warning: default_success_rate_warning(),
            success_rate_error: default_success_rate_error(),
        }
    }
}

/// Partial configuration applied at runtime via
/// [`PerformanceMonitor::update_configuration`](crate::monitoring::PerformanceMonitor::update_configuration)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    /// New metric history capacity
    pub max_metric_history: Option<usize>,
    /// New alert history capacity
    pub max_alert_history: Option<usize>,
    /// New health-check cycle interval, in seconds
    pub check_interval_secs: Option<u64>,
    /// New availability poll interval, in seconds
    pub poll_interval_secs: Option<u64>,
    /// New alert thresholds
    pub thresholds: Option<AlertThresholds>,
}
