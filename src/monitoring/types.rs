//! Type definitions for monitoring metrics, health, and alerts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Operation name attached to synthetic metrics recorded by the performance probe
pub const HEALTH_CHECK_OPERATION: &str = "health_check";

/// One completed operation, before the store stamps it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Provider that served the operation
    pub provider: String,
    /// Operation name, e.g. `generate` or `health_check`
    pub operation: String,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// Whether the operation succeeded
    pub success: bool,
    /// Tokens produced, when known
    pub tokens: Option<u32>,
    /// Context size in tokens, when known
    pub context_size: Option<u32>,
    /// Error classification for failed operations
    pub error_kind: Option<String>,
}

impl MetricRecord {
    /// Minimal record for an operation outcome
    pub fn new(provider: impl Into<String>, operation: impl Into<String>, duration_ms: u64, success: bool) -> Self {
        Self {
            provider: provider.into(),
            operation: operation.into(),
            duration_ms,
            success,
            tokens: None,
            context_size: None,
            error_kind: None,
        }
    }
}

/// One completed operation as retained by the metric store
///
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSnapshot {
    /// Ingestion timestamp
    pub timestamp: DateTime<Utc>,
    /// Provider that served the operation
    pub provider: String,
    /// Operation name
    pub operation: String,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// Whether the operation succeeded
    pub success: bool,
    /// Tokens produced, when known
    pub tokens: Option<u32>,
    /// Context size in tokens, when known
    pub context_size: Option<u32>,
    /// Error classification for failed operations
    pub error_kind: Option<String>,
}

impl MetricSnapshot {
    pub(crate) fn stamp(record: MetricRecord, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            provider: record.provider,
            operation: record.operation,
            duration_ms: record.duration_ms,
            success: record.success,
            tokens: record.tokens,
            context_size: record.context_size,
            error_kind: record.error_kind,
        }
    }
}

/// Outcome of one probe dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Provider the check ran against
    pub provider: String,
    /// Whether the check passed
    pub available: bool,
    /// Check latency in milliseconds
    pub latency_ms: u64,
    /// Error message for failed checks
    pub error: Option<String>,
    /// When the check ran
    pub timestamp: DateTime<Utc>,
    /// Sequential failures for this (provider, check) pair; 0 exactly when available
    pub consecutive_failures: u32,
}

impl HealthCheckResult {
    /// Successful check; resets the consecutive-failure count
    pub fn ok(provider: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            provider: provider.into(),
            available: true,
            latency_ms,
            error: None,
            timestamp: Utc::now(),
            consecutive_failures: 0,
        }
    }

    /// Failed check, carrying the incremented consecutive-failure count
    pub fn failed(
        provider: impl Into<String>,
        latency_ms: u64,
        error: impl Into<String>,
        consecutive_failures: u32,
    ) -> Self {
        Self {
            provider: provider.into(),
            available: false,
            latency_ms,
            error: Some(error.into()),
            timestamp: Utc::now(),
            consecutive_failures,
        }
    }
}

/// Per-provider health verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
    Unhealthy,
    Unknown,
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceStatus::Healthy => write!(f, "healthy"),
            ServiceStatus::Degraded => write!(f, "degraded"),
            ServiceStatus::Unhealthy => write!(f, "unhealthy"),
            ServiceStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Health verdict for one provider, built fresh on every probe run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Provider id
    pub provider: String,
    /// Reduced verdict over all checks run
    pub status: ServiceStatus,
    /// Individual check outcomes by check name
    pub checks: HashMap<String, HealthCheckResult>,
    /// Human-readable summary
    pub summary: String,
    /// Suggested actions, populated when the verdict is not healthy
    pub recommendations: Vec<String>,
}

/// Global health verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl std::fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemStatus::Healthy => write!(f, "healthy"),
            SystemStatus::Degraded => write!(f, "degraded"),
            SystemStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// System-wide rollup across all configured providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHealth {
    /// Verdict derived from the per-service statuses
    pub overall: SystemStatus,
    /// Per-provider health, in configuration order
    pub services: Vec<ServiceHealth>,
    /// When the rollup was computed
    pub timestamp: DateTime<Utc>,
    /// Seconds since the orchestrator was constructed
    pub uptime_secs: u64,
    /// Most recent alerts, newest first
    pub recent_alerts: Vec<HealthAlert>,
}

/// Alert severity levels, ordered by urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "INFO"),
            AlertSeverity::Warning => write!(f, "WARNING"),
            AlertSeverity::Error => write!(f, "ERROR"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A raised condition retained in the alert history
///
/// Never mutated after append, except the `resolved` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAlert {
    /// Alert id
    pub id: String,
    /// Severity
    pub severity: AlertSeverity,
    /// What happened
    pub message: String,
    /// When it was raised
    pub timestamp: DateTime<Utc>,
    /// Provider the condition concerns, when provider-scoped
    pub provider: Option<String>,
    /// Whether the condition has been resolved
    pub resolved: bool,
}

impl HealthAlert {
    /// Create an unresolved alert stamped with the current time
    pub fn new(severity: AlertSeverity, message: impl Into<String>, provider: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            severity,
            message: message.into(),
            timestamp: Utc::now(),
            provider,
            resolved: false,
        }
    }
}

/// Rolling statistics for one provider, recomputed on demand and never stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStats {
    /// Mean duration over successful operations, in milliseconds
    pub avg_latency_ms: f64,
    /// Successful operations / total operations
    pub success_rate: f64,
    /// Total recorded operations for this provider
    pub total_requests: u64,
    /// Requests per second over the trailing throughput window
    pub throughput: f64,
    /// 1.0 when the latest connectivity check passed, else 0.0
    pub availability: f64,
    /// Timestamp of the most recent failed operation
    pub last_failure: Option<DateTime<Utc>>,
}

/// Overall performance grade across both providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl std::fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthGrade::Excellent => write!(f, "excellent"),
            HealthGrade::Good => write!(f, "good"),
            HealthGrade::Fair => write!(f, "fair"),
            HealthGrade::Poor => write!(f, "poor"),
        }
    }
}

/// Derived recommendations and bottlenecks across providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceInsights {
    /// When the insights were generated
    pub generated_at: DateTime<Utc>,
    /// Graded overall health
    pub overall_health: HealthGrade,
    /// Suggested actions
    pub recommendations: Vec<String>,
    /// Identified bottlenecks
    pub bottlenecks: Vec<String>,
    /// Possible optimizations
    pub optimizations: Vec<String>,
}
