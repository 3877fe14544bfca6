//! Configuration loading

use super::models::MonitorConfig;
use crate::utils::error::Result;
use std::path::Path;
use tracing::info;

impl MonitorConfig {
    /// Load configuration from a YAML file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string and validate it
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: MonitorConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;
    use std::io::Write;

    const SAMPLE: &str = r#"
providers:
  - id: lmdeploy
    kind: lmdeploy
    base_url: http://localhost:8000
    default_model: llama3
  - id: vllm
    kind: vllm
    base_url: http://localhost:8001
monitoring:
  check_interval_secs: 15
  max_metric_history: 500
"#;

    #[test]
    fn test_from_yaml_defaults() {
        let config = MonitorConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[0].kind, ProviderKind::Lmdeploy);
        assert_eq!(config.providers[0].default_model, "llama3");
        // Unset fields fall back to defaults
        assert_eq!(config.providers[1].default_model, "default");
        assert_eq!(config.providers[1].timeout_secs, 30);
        assert_eq!(config.monitoring.check_interval_secs, 15);
        assert_eq!(config.monitoring.poll_interval_secs, 30);
        assert_eq!(config.monitoring.max_metric_history, 500);
        assert_eq!(config.monitoring.max_alert_history, 100);
        assert_eq!(config.monitoring.thresholds.latency_error_ms, 5000);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = MonitorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.providers.len(), 2);
    }

    #[test]
    fn test_from_file_missing() {
        assert!(MonitorConfig::from_file("/nonexistent/monitor.yaml").is_err());
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        assert!(MonitorConfig::from_yaml("providers: {not a list}").is_err());
    }
}
