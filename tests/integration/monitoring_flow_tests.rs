//! End-to-end monitoring flow against mock HTTP backends

use crate::common::ScriptedProvider;
use provider_watch::config::{ConfigUpdate, MonitorConfig, MonitoringConfig};
use provider_watch::monitoring::{MetricRecord, PerformanceMonitor, ServiceStatus, SystemStatus};
use provider_watch::ProviderClient;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "pong",
            "done": true,
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"models": [{"name": "llama3"}]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "running"})))
        .mount(&server)
        .await;
    server
}

fn config_yaml(lmdeploy_url: &str, vllm_url: &str) -> String {
    format!(
        r#"
providers:
  - id: lmdeploy
    kind: lmdeploy
    base_url: {}
    default_model: llama3
    timeout_secs: 5
  - id: vllm
    kind: vllm
    base_url: {}
    timeout_secs: 5
monitoring:
  check_interval_secs: 60
  poll_interval_secs: 30
"#,
        lmdeploy_url, vllm_url
    )
}

#[tokio::test]
async fn test_full_flow_with_healthy_backends() {
    let lmdeploy = mock_backend().await;
    let vllm = mock_backend().await;

    let config = MonitorConfig::from_yaml(&config_yaml(&lmdeploy.uri(), &vllm.uri())).unwrap();
    let monitor = PerformanceMonitor::from_config(&config).unwrap();

    let health = monitor.get_system_health().await;
    assert_eq!(health.overall, SystemStatus::Healthy);
    assert_eq!(health.services.len(), 2);
    assert!(
        health
            .services
            .iter()
            .all(|s| s.status == ServiceStatus::Healthy)
    );

    // The performance probe recorded a synthetic metric per provider
    let stats = monitor.provider_stats("lmdeploy");
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.availability, 1.0);
    assert_eq!(stats.success_rate, 1.0);
}

#[tokio::test]
async fn test_full_flow_with_one_backend_down() {
    let lmdeploy = mock_backend().await;

    // vllm points at a closed port
    let config =
        MonitorConfig::from_yaml(&config_yaml(&lmdeploy.uri(), "http://127.0.0.1:1")).unwrap();
    let monitor = PerformanceMonitor::from_config(&config).unwrap();

    let health = monitor.get_system_health().await;
    assert_eq!(health.overall, SystemStatus::Degraded);

    let vllm = health
        .services
        .iter()
        .find(|s| s.provider == "vllm")
        .unwrap();
    assert_eq!(vllm.status, ServiceStatus::Unhealthy);
    assert_eq!(monitor.provider_stats("vllm").availability, 0.0);
}

#[tokio::test]
async fn test_scheduled_monitoring_lifecycle() {
    let providers: Vec<Arc<dyn ProviderClient>> = vec![
        Arc::new(ScriptedProvider::up("lmdeploy")),
        Arc::new(ScriptedProvider::up("vllm")),
    ];
    let monitor = PerformanceMonitor::new(MonitoringConfig::default(), providers);

    monitor.start();
    assert!(monitor.is_active());

    // Let the initial cycle and poll run
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    monitor.stop().await;
    assert!(!monitor.is_active());

    // The initial cycle left health state behind
    let stats = monitor.provider_stats("lmdeploy");
    assert_eq!(stats.availability, 1.0);
    assert!(stats.total_requests >= 1);
}

#[tokio::test]
async fn test_degraded_system_raises_alert_cycle() {
    let providers: Vec<Arc<dyn ProviderClient>> = vec![
        Arc::new(ScriptedProvider::up("lmdeploy")),
        Arc::new(ScriptedProvider::down("vllm")),
    ];
    let monitor = PerformanceMonitor::new(MonitoringConfig::default(), providers);

    monitor.start();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    monitor.stop().await;

    let alerts = monitor.get_recent_alerts(None);
    assert!(
        alerts
            .iter()
            .any(|a| a.message.contains("system degraded"))
    );
}

#[tokio::test]
async fn test_export_and_reconfigure() {
    let providers: Vec<Arc<dyn ProviderClient>> =
        vec![Arc::new(ScriptedProvider::up("lmdeploy"))];
    let monitor = PerformanceMonitor::new(MonitoringConfig::default(), providers);

    for i in 0..20u64 {
        monitor.record_metric(MetricRecord::new("lmdeploy", "generate", 50 + i, true));
    }

    let export = monitor.export_monitoring_data();
    assert_eq!(export["metrics"]["recorded"], 20);
    assert!(export["providers"]["lmdeploy"]["avg_latency_ms"].is_number());

    let update = ConfigUpdate {
        max_metric_history: Some(5),
        ..Default::default()
    };
    monitor.update_configuration(update).await.unwrap();
    assert_eq!(monitor.export_monitoring_data()["metrics"]["recorded"], 5);
}
