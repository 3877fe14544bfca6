//! Configuration management
//!
//! Typed configuration for the monitor: provider endpoints, scheduling
//! intervals, history capacities, and alert thresholds. Loaded from YAML with
//! serde defaults, validated before use.

mod loader;
mod models;
mod validation;

pub use models::{
    AlertThresholds, ConfigUpdate, MonitorConfig, MonitoringConfig, ProviderEndpoint, ProviderKind,
};
