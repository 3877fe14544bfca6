//! Configuration validation

use super::models::{AlertThresholds, ConfigUpdate, MonitorConfig};
use crate::utils::error::{MonitorError, Result};
use std::collections::HashSet;
use url::Url;

impl MonitorConfig {
    /// Validate the full configuration
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for provider in &self.providers {
            if provider.id.is_empty() {
                return Err(MonitorError::Config("provider id must not be empty".into()));
            }
            if !seen.insert(provider.id.as_str()) {
                return Err(MonitorError::Config(format!(
                    "duplicate provider id: {}",
                    provider.id
                )));
            }
            Url::parse(&provider.base_url).map_err(|e| {
                MonitorError::Config(format!(
                    "invalid base_url for provider {}: {}",
                    provider.id, e
                ))
            })?;
            if provider.timeout_secs == 0 {
                return Err(MonitorError::Config(format!(
                    "timeout_secs for provider {} must be at least 1",
                    provider.id
                )));
            }
        }

        validate_intervals(
            Some(self.monitoring.check_interval_secs),
            Some(self.monitoring.poll_interval_secs),
        )?;
        validate_capacities(
            Some(self.monitoring.max_metric_history),
            Some(self.monitoring.max_alert_history),
        )?;
        validate_thresholds(&self.monitoring.thresholds)
    }
}

impl ConfigUpdate {
    /// Validate a runtime configuration update
    pub fn validate(&self) -> Result<()> {
        validate_intervals(self.check_interval_secs, self.poll_interval_secs)?;
        validate_capacities(self.max_metric_history, self.max_alert_history)?;
        if let Some(thresholds) = &self.thresholds {
            validate_thresholds(thresholds)?;
        }
        Ok(())
    }
}

fn validate_intervals(check_secs: Option<u64>, poll_secs: Option<u64>) -> Result<()> {
    if check_secs == Some(0) {
        return Err(MonitorError::Config(
            "check_interval_secs must be at least 1".into(),
        ));
    }
    if poll_secs == Some(0) {
        return Err(MonitorError::Config(
            "poll_interval_secs must be at least 1".into(),
        ));
    }
    Ok(())
}

fn validate_capacities(metrics: Option<usize>, alerts: Option<usize>) -> Result<()> {
    if metrics == Some(0) {
        return Err(MonitorError::Config(
            "max_metric_history must be at least 1".into(),
        ));
    }
    if alerts == Some(0) {
        return Err(MonitorError::Config(
            "max_alert_history must be at least 1".into(),
        ));
    }
    Ok(())
}

fn validate_thresholds(thresholds: &AlertThresholds) -> Result<()> {
    if thresholds.latency_warning_ms >= thresholds.latency_error_ms {
        return Err(MonitorError::Config(
            "latency_warning_ms must be below latency_error_ms".into(),
        ));
    }
    for (name, rate) in [
        ("success_rate_warning", thresholds.success_rate_warning),
        ("success_rate_error", thresholds.success_rate_error),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            return Err(MonitorError::Config(format!(
                "{} must be within 0.0..=1.0",
                name
            )));
        }
    }
    if thresholds.success_rate_error >= thresholds.success_rate_warning {
        return Err(MonitorError::Config(
            "success_rate_error must be below success_rate_warning".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MonitoringConfig, ProviderEndpoint, ProviderKind};

    fn endpoint(id: &str) -> ProviderEndpoint {
        ProviderEndpoint {
            id: id.to_string(),
            kind: ProviderKind::Vllm,
            base_url: "http://localhost:8000".to_string(),
            default_model: "default".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = MonitorConfig {
            providers: vec![endpoint("a"), endpoint("b")],
            monitoring: MonitoringConfig::default(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_provider_id() {
        let config = MonitorConfig {
            providers: vec![endpoint("a"), endpoint("a")],
            monitoring: MonitoringConfig::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_url() {
        let mut bad = endpoint("a");
        bad.base_url = "not a url".to_string();
        let config = MonitorConfig {
            providers: vec![bad],
            monitoring: MonitoringConfig::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let update = ConfigUpdate {
            check_interval_secs: Some(0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let update = ConfigUpdate {
            max_metric_history: Some(0),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = ConfigUpdate {
            max_alert_history: Some(0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let update = ConfigUpdate {
            thresholds: Some(AlertThresholds {
                latency_warning_ms: 6000,
                latency_error_ms: 5000,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
