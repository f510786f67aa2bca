// Unit Tests for the SDK Error Type
//
// UNIT UNDER TEST: SdkError
//
// BUSINESS RESPONSIBILITY:
//   - Separates encode, transport, status, decode and configuration failures
//   - Maps HTTP statuses to categories and severities for alerting
//   - Flags failures that a caller may reasonably repeat
//   - Produces display messages without leaking response bodies
//
// TEST COVERAGE:
//   - Category and severity mapping per variant and per status range
//   - Retryability of transport and status errors
//   - Display output of the status variant
//   - User-facing messages for common statuses

use crate::error::{ErrorCategory, ErrorSeverity, SdkError};

fn json_error() -> serde_json::Error {
    serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
}

#[cfg(test)]
mod sdk_error_categorization_tests {
    use super::*;

    #[test]
    fn test_http_status_client_errors_are_client_category() {
        // Arrange & Act
        let unauthorized = SdkError::http_status(401, "Unauthorized");
        let bad_request = SdkError::http_status(400, "Bad Request");

        // Assert
        assert_eq!(unauthorized.category(), ErrorCategory::Client);
        assert_eq!(bad_request.category(), ErrorCategory::Client);
        assert_eq!(unauthorized.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_rate_limit_and_gateway_errors_are_transient() {
        for status in [408u16, 429, 502, 503, 504] {
            let error = SdkError::http_status(status, "");
            assert_eq!(
                error.category(),
                ErrorCategory::Transient,
                "status {status} should be transient"
            );
        }
    }

    #[test]
    fn test_internal_server_error_is_external() {
        let error = SdkError::http_status(500, "Internal Server Error");

        assert_eq!(error.category(), ErrorCategory::External);
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_not_found_is_informational() {
        let error = SdkError::http_status(404, "Not Found");

        assert_eq!(error.severity(), ErrorSeverity::Info);
        assert_eq!(error.category(), ErrorCategory::Client);
    }

    #[test]
    fn test_configuration_and_path_errors_are_client_errors() {
        let configuration = SdkError::configuration("AI Stats API key is required");
        let missing = SdkError::missing_path_parameter("getVideo", "video_id");
        let unknown = SdkError::unknown_operation("listEverything");

        for error in [configuration, missing, unknown] {
            assert_eq!(error.category(), ErrorCategory::Client);
            assert!(!error.is_retryable());
        }
    }

    #[test]
    fn test_decode_error_is_external_warning() {
        let error = SdkError::decode("bad body", json_error());

        assert_eq!(error.category(), ErrorCategory::External);
        assert_eq!(error.severity(), ErrorSeverity::Warning);
        assert!(!error.is_retryable());
    }
}

#[cfg(test)]
mod sdk_error_retry_tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_retryable() {
        // Arrange
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");

        // Act
        let error = SdkError::transport("POST /chat/completions failed", Some(Box::new(source)));

        // Assert
        assert!(error.is_retryable());
        assert_eq!(error.category(), ErrorCategory::External);
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(SdkError::http_status(408, "").is_retryable());
        assert!(SdkError::http_status(429, "").is_retryable());
        assert!(SdkError::http_status(500, "").is_retryable());
        assert!(SdkError::http_status(503, "").is_retryable());

        assert!(!SdkError::http_status(400, "").is_retryable());
        assert!(!SdkError::http_status(401, "").is_retryable());
        assert!(!SdkError::http_status(404, "").is_retryable());
    }

    #[test]
    fn test_serialization_error_is_not_retryable() {
        let error = SdkError::serialization("bad body", json_error());

        assert!(!error.is_retryable());
        assert_eq!(error.category(), ErrorCategory::Client);
    }
}

#[cfg(test)]
mod sdk_error_message_tests {
    use super::*;

    #[test]
    fn test_http_status_display_contains_status_and_text() {
        let error = SdkError::http_status(401, "Unauthorized");

        assert_eq!(error.to_string(), "Request failed: 401 Unauthorized");
        assert_eq!(error.status(), Some(401));
    }

    #[test]
    fn test_missing_path_parameter_display_names_operation() {
        let error = SdkError::missing_path_parameter("deleteVideo", "video_id");
        let message = error.to_string();

        assert!(message.contains("deleteVideo"));
        assert!(message.contains("video_id"));
    }

    #[test]
    fn test_user_messages_for_common_statuses() {
        assert!(SdkError::http_status(401, "")
            .user_message()
            .contains("API key"));
        assert!(SdkError::http_status(404, "")
            .user_message()
            .contains("not found"));
        assert!(SdkError::http_status(418, "")
            .user_message()
            .contains("418"));
    }

    #[test]
    fn test_user_message_hides_transport_details() {
        let error = SdkError::transport("dns error: gateway.internal.lan", None);

        assert!(!error.user_message().contains("gateway.internal.lan"));
    }

    #[test]
    fn test_source_chain_is_preserved() {
        use std::error::Error;

        let error = SdkError::decode("bad body", json_error());

        assert!(error.source().is_some(), "Decode errors keep the serde source");
    }
}
