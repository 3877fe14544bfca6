//! Shared test infrastructure

use async_trait::async_trait;
use provider_watch::config::{ProviderEndpoint, ProviderKind};
use provider_watch::{MonitorError, ProviderClient, Result};

/// Endpoint pointing at a mock server
pub fn endpoint(id: &str, kind: ProviderKind, base_url: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        id: id.to_string(),
        kind,
        base_url: base_url.to_string(),
        default_model: "test-model".to_string(),
        timeout_secs: 5,
    }
}

/// In-memory provider with scripted outcomes, no HTTP involved
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    pub id: String,
    pub reachable: bool,
    pub models: Vec<String>,
}

impl ScriptedProvider {
    pub fn up(id: &str) -> Self {
        Self {
            id: id.to_string(),
            reachable: true,
            models: vec!["test-model".to_string()],
        }
    }

    pub fn down(id: &str) -> Self {
        Self {
            id: id.to_string(),
            reachable: false,
            models: Vec::new(),
        }
    }
}

#[async_trait]
impl ProviderClient for ScriptedProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn is_available(&self) -> Result<bool> {
        if self.reachable {
            Ok(true)
        } else {
            Err(MonitorError::Provider("connection refused".to_string()))
        }
    }

    async fn generate_text(&self, _prompt: &str) -> Result<String> {
        if self.reachable {
            Ok("scripted output".to_string())
        } else {
            Err(MonitorError::Provider("connection refused".to_string()))
        }
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        if self.reachable {
            Ok(self.models.clone())
        } else {
            Err(MonitorError::Provider("connection refused".to_string()))
        }
    }

    fn supports_server_status(&self) -> bool {
        true
    }

    async fn server_status(&self) -> Result<serde_json::Value> {
        if self.reachable {
            Ok(serde_json::json!({"status": "running"}))
        } else {
            Err(MonitorError::Provider("connection refused".to_string()))
        }
    }
}
