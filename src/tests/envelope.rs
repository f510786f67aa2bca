// Unit Tests for the Request Envelope
//
// UNIT UNDER TEST: RequestEnvelope (request assembly only, no network)
//
// BUSINESS RESPONSIBILITY:
//   - Joins base URL, path and encoded query into one endpoint
//   - Layers per-call headers over defaults, case-insensitively
//   - Marks JSON bodies with a content type and leaves body-less calls bare
//   - Rejects headers that are not valid HTTP before anything is sent
//
// TEST COVERAGE:
//   - Endpoint construction with and without query parameters
//   - Header merge and override rules
//   - Body encoding and content type
//   - Default header mutation

use crate::envelope::{Method, RequestEnvelope, NO_BODY};
use crate::error::SdkError;
use crate::tests::helpers::{
    body_bytes, create_test_envelope, header_value, string_map, TEST_BASE_URL,
};
use serde_json::json;
use std::collections::HashMap;
use std::str::FromStr;

#[cfg(test)]
mod endpoint_tests {
    use super::*;

    #[test]
    fn test_empty_query_yields_base_plus_path() {
        let envelope = create_test_envelope();

        let endpoint = envelope.endpoint("/models", &HashMap::new());

        assert_eq!(endpoint, "https://gateway.test/v1/models");
        assert!(!endpoint.contains('?'));
    }

    #[test]
    fn test_query_is_form_encoded_and_sorted() {
        let envelope = create_test_envelope();
        let query = string_map(&[("offset", "10"), ("limit", "5"), ("q", "a b&c")]);

        let endpoint = envelope.endpoint("/models", &query);

        assert_eq!(
            endpoint,
            "https://gateway.test/v1/models?limit=5&offset=10&q=a+b%26c"
        );
    }

    #[test]
    fn test_trailing_slashes_are_trimmed_from_base_url() {
        let envelope = RequestEnvelope::new("https://gateway.test/v1///", reqwest::Client::new());

        assert_eq!(envelope.base_url(), TEST_BASE_URL);
        assert_eq!(
            envelope.endpoint("/health", &HashMap::new()),
            "https://gateway.test/v1/health"
        );
    }

    #[test]
    fn test_built_request_url_matches_endpoint() {
        let envelope = create_test_envelope();
        let query = string_map(&[("limit", "5")]);

        let request = envelope
            .build_request(Method::Get, "/models", &query, &HashMap::new(), NO_BODY)
            .unwrap();

        assert_eq!(*request.method(), reqwest::Method::GET);
        assert_eq!(request.url().as_str(), "https://gateway.test/v1/models?limit=5");
    }
}

#[cfg(test)]
mod header_tests {
    use super::*;

    #[test]
    fn test_per_call_header_overrides_default_case_insensitively() {
        // Arrange
        let envelope = create_test_envelope()
            .with_headers(string_map(&[("X-Env", "default"), ("X-Default-Only", "d")]));
        let per_call = string_map(&[("x-env", "override"), ("X-Call-Only", "c")]);

        // Act
        let request = envelope
            .build_request(Method::Get, "/credits", &HashMap::new(), &per_call, NO_BODY)
            .unwrap();

        // Assert
        assert_eq!(request.headers().get_all("x-env").iter().count(), 1);
        assert_eq!(header_value(&request, "x-env").as_deref(), Some("override"));
        assert_eq!(header_value(&request, "x-default-only").as_deref(), Some("d"));
        assert_eq!(header_value(&request, "x-call-only").as_deref(), Some("c"));
    }

    #[test]
    fn test_case_duplicate_per_call_headers_resolve_deterministically() {
        let envelope = create_test_envelope();
        let per_call = string_map(&[("x-env", "lower"), ("X-ENV", "upper")]);

        for _ in 0..16 {
            let request = envelope
                .build_request(Method::Get, "/credits", &HashMap::new(), &per_call, NO_BODY)
                .unwrap();

            assert_eq!(request.headers().get_all("x-env").iter().count(), 1);
            assert_eq!(header_value(&request, "x-env").as_deref(), Some("lower"));
        }
    }

    #[test]
    fn test_set_header_replaces_existing_name() {
        let mut envelope = create_test_envelope();
        envelope.set_header("Authorization", "Bearer old");

        let previous = envelope.set_header("authorization", "Bearer new");

        assert_eq!(previous.as_deref(), Some("Bearer old"));
        assert_eq!(envelope.headers().len(), 1);
        assert_eq!(
            envelope.headers().get("authorization").map(String::as_str),
            Some("Bearer new")
        );
    }

    #[test]
    fn test_remove_header_ignores_case() {
        let mut envelope = create_test_envelope();
        envelope.set_header("X-Team", "research");

        assert_eq!(envelope.remove_header("x-team").as_deref(), Some("research"));
        assert!(envelope.headers().is_empty());
        assert_eq!(envelope.remove_header("x-team"), None);
    }

    #[test]
    fn test_invalid_header_value_is_configuration_error() {
        let envelope = create_test_envelope();
        let per_call = string_map(&[("Authorization", "Bearer bad\nkey")]);

        let result =
            envelope.build_request(Method::Get, "/credits", &HashMap::new(), &per_call, NO_BODY);

        assert!(matches!(result, Err(SdkError::Configuration { .. })));
    }

    #[test]
    fn test_invalid_header_name_is_configuration_error() {
        let envelope = create_test_envelope().with_headers(string_map(&[("bad header", "x")]));

        let result = envelope.build_request(
            Method::Get,
            "/credits",
            &HashMap::new(),
            &HashMap::new(),
            NO_BODY,
        );

        assert!(matches!(result, Err(SdkError::Configuration { .. })));
    }
}

#[cfg(test)]
mod body_tests {
    use super::*;

    #[test]
    fn test_body_is_json_with_content_type() {
        let envelope = create_test_envelope();
        let body = json!({"model": "openai/gpt-4o-mini", "messages": []});

        let request = envelope
            .build_request(
                Method::Post,
                "/chat/completions",
                &HashMap::new(),
                &HashMap::new(),
                Some(&body),
            )
            .unwrap();

        assert_eq!(
            header_value(&request, "content-type").as_deref(),
            Some("application/json")
        );
        let sent: serde_json::Value =
            serde_json::from_slice(&body_bytes(&request).unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn test_no_body_means_no_content_type() {
        let envelope = create_test_envelope();

        let request = envelope
            .build_request(
                Method::Delete,
                "/videos/v1",
                &HashMap::new(),
                &HashMap::new(),
                NO_BODY,
            )
            .unwrap();

        assert!(request.headers().get("content-type").is_none());
        assert!(request.body().is_none());
    }

    #[test]
    fn test_null_body_is_sent_as_no_body() {
        let envelope = create_test_envelope();

        let request = envelope
            .build_request(
                Method::Delete,
                "/videos/v1",
                &HashMap::new(),
                &HashMap::new(),
                Some(&Option::<u8>::None),
            )
            .unwrap();

        assert!(request.headers().get("content-type").is_none());
        assert!(request.body().is_none());
    }

    #[test]
    fn test_json_content_type_wins_over_per_call_value() {
        let envelope = create_test_envelope();
        let per_call = string_map(&[("Content-Type", "text/plain")]);

        let request = envelope
            .build_request(
                Method::Post,
                "/moderations",
                &HashMap::new(),
                &per_call,
                Some(&json!({"input": "hi"})),
            )
            .unwrap();

        assert_eq!(
            header_value(&request, "content-type").as_deref(),
            Some("application/json")
        );
    }

    #[test]
    fn test_typed_body_is_accepted() {
        #[derive(serde::Serialize)]
        struct Body<'a> {
            input: &'a str,
        }

        let request = create_test_envelope()
            .build_request(
                Method::Post,
                "/embeddings",
                &HashMap::new(),
                &HashMap::new(),
                Some(&Body { input: "hello" }),
            )
            .unwrap();

        assert_eq!(body_bytes(&request).unwrap(), br#"{"input":"hello"}"#.to_vec());
    }
}

#[cfg(test)]
mod method_tests {
    use super::*;

    #[test]
    fn test_method_parses_case_insensitively() {
        assert_eq!(Method::from_str("get").unwrap(), Method::Get);
        assert_eq!(Method::from_str("PATCH").unwrap(), Method::Patch);
        assert!(Method::from_str("PUT").is_err());
    }

    #[test]
    fn test_method_display_and_conversion() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(Method::Post), reqwest::Method::POST);
    }
}
