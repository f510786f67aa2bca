//! Test helper utilities shared by the unit test modules
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::config::ClientConfig;
use crate::envelope::RequestEnvelope;
use std::collections::HashMap;

pub const TEST_BASE_URL: &str = "https://gateway.test/v1";
pub const TEST_API_KEY: &str = "test-ai-stats-key";

/// Envelope pointing at a host that is never contacted
pub fn create_test_envelope() -> RequestEnvelope {
    RequestEnvelope::new(TEST_BASE_URL, reqwest::Client::new())
}

/// Configuration that passes validation
pub fn create_test_config() -> ClientConfig {
    ClientConfig::new(TEST_API_KEY).with_base_url(TEST_BASE_URL)
}

/// Build a string map from literal pairs
pub fn string_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Header value from a built request, as a string
pub fn header_value(request: &reqwest::Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Body bytes of a built request, if it has an in-memory body
pub fn body_bytes(request: &reqwest::Request) -> Option<Vec<u8>> {
    request
        .body()
        .and_then(|b| b.as_bytes())
        .map(<[u8]>::to_vec)
}
