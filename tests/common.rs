//! Test helper utilities for ai-stats integration tests
//!
//! Shared fixtures for tests that run the SDK against a wiremock server.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use ai_stats::{AiStats, ClientConfig, RequestEnvelope};
use std::collections::HashMap;
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "sk-test-integration";

/// Gateway base URL served by the mock server
pub fn gateway_url(server: &MockServer) -> String {
    format!("{}/v1", server.uri())
}

/// Facade pointed at the mock server
pub fn create_test_client(server: &MockServer) -> AiStats {
    let config = ClientConfig::new(TEST_API_KEY)
        .with_base_url(gateway_url(server))
        .with_user_agent("ai-stats-tests")
        .with_timeout(Duration::from_secs(5));
    AiStats::new(config).unwrap()
}

/// Bare envelope pointed at the mock server, with the given default headers
pub fn create_test_envelope(server: &MockServer, headers: &[(&str, &str)]) -> RequestEnvelope {
    RequestEnvelope::new(gateway_url(server), reqwest::Client::new())
        .with_headers(string_map(headers))
}

pub fn string_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A base URL on a local port nothing is listening on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/v1")
}

/// Initialise tracing output for a test run; safe to call more than once
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
