//! Integration tests

pub mod monitoring_flow_tests;
pub mod provider_client_tests;
