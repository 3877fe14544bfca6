//! HTTP provider client tests against a mock Ollama-compatible server

use crate::common::endpoint;
use provider_watch::config::ProviderKind;
use provider_watch::core::providers::build_provider;
use provider_watch::{LmdeployProvider, ProviderClient, VllmProvider};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_availability_when_server_responds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let provider =
        LmdeployProvider::new(&endpoint("lmdeploy", ProviderKind::Lmdeploy, &server.uri()))
            .unwrap();
    assert!(provider.is_available().await.unwrap());
}

#[tokio::test]
async fn test_availability_false_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider =
        VllmProvider::new(&endpoint("vllm", ProviderKind::Vllm, &server.uri())).unwrap();
    assert!(!provider.is_available().await.unwrap());
}

#[tokio::test]
async fn test_availability_error_when_unreachable() {
    // Nothing listens on this port
    let provider = VllmProvider::new(&endpoint(
        "vllm",
        ProviderKind::Vllm,
        "http://127.0.0.1:1",
    ))
    .unwrap();
    assert!(provider.is_available().await.is_err());
}

#[tokio::test]
async fn test_generate_sends_non_streaming_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({
            "model": "test-model",
            "prompt": "ping",
            "stream": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "pong",
            "done": true,
        })))
        .mount(&server)
        .await;

    let provider =
        LmdeployProvider::new(&endpoint("lmdeploy", ProviderKind::Lmdeploy, &server.uri()))
            .unwrap();
    let text = provider.generate_text("ping").await.unwrap();
    assert_eq!(text, "pong");
}

#[tokio::test]
async fn test_generate_surfaces_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider =
        VllmProvider::new(&endpoint("vllm", ProviderKind::Vllm, &server.uri())).unwrap();
    let err = provider.generate_text("ping").await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_list_models_parses_tags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {"name": "llama3", "size": 4661224676u64},
                {"name": "qwen"},
            ],
        })))
        .mount(&server)
        .await;

    let provider =
        LmdeployProvider::new(&endpoint("lmdeploy", ProviderKind::Lmdeploy, &server.uri()))
            .unwrap();
    let models = provider.list_models().await.unwrap();
    assert_eq!(models, vec!["llama3".to_string(), "qwen".to_string()]);
}

#[tokio::test]
async fn test_list_models_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .mount(&server)
        .await;

    let provider =
        VllmProvider::new(&endpoint("vllm", ProviderKind::Vllm, &server.uri())).unwrap();
    assert!(provider.list_models().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_server_status_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running",
            "loaded_models": 2,
        })))
        .mount(&server)
        .await;

    let provider =
        LmdeployProvider::new(&endpoint("lmdeploy", ProviderKind::Lmdeploy, &server.uri()))
            .unwrap();
    assert!(provider.supports_server_status());
    let status = provider.server_status().await.unwrap();
    assert_eq!(status["loaded_models"], 2);
}

#[tokio::test]
async fn test_build_provider_dispatches_on_kind() {
    let lmdeploy = build_provider(&endpoint(
        "batch",
        ProviderKind::Lmdeploy,
        "http://localhost:23333",
    ))
    .unwrap();
    let vllm = build_provider(&endpoint(
        "local",
        ProviderKind::Vllm,
        "http://localhost:8000",
    ))
    .unwrap();

    assert_eq!(lmdeploy.id(), "batch");
    assert_eq!(vllm.id(), "local");
    assert!(lmdeploy.supports_server_status());
    assert!(vllm.supports_server_status());
}

#[test]
fn test_invalid_base_url_rejected() {
    let result = LmdeployProvider::new(&endpoint(
        "lmdeploy",
        ProviderKind::Lmdeploy,
        "not a url",
    ));
    assert!(result.is_err());
}
