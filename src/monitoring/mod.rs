//! Provider health and performance monitoring
//!
//! Bounded metric history, rolling per-provider statistics, multi-stage
//! health probes, threshold-based alerting, and derived insights, all owned
//! by a single [`PerformanceMonitor`] orchestrator.

pub mod alerts;
pub mod insights;
pub mod metrics;
pub mod monitor;
pub mod probe;
pub mod service;

mod bounded;
mod types;

pub use alerts::AlertManager;
pub use insights::InsightsEngine;
pub use metrics::MetricStore;
pub use monitor::PerformanceMonitor;
pub use probe::{
    CHECK_CONNECTIVITY, CHECK_MODELS, CHECK_PERFORMANCE, CHECK_RESOURCES, HealthProbe,
};
pub use service::HealthCheckService;
pub use types::{
    AlertSeverity, HEALTH_CHECK_OPERATION, HealthAlert, HealthCheckResult, HealthGrade,
    MetricRecord, MetricSnapshot, PerformanceInsights, ProviderStats, ServiceHealth,
    ServiceStatus, SystemHealth, SystemStatus,
};
