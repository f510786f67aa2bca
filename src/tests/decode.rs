// Unit Tests for Response Decoding
//
// UNIT UNDER TEST: decode
//
// TEST COVERAGE:
//   - Empty bodies decode to the target's default
//   - Valid JSON decodes into documents and typed views
//   - Invalid or mismatched JSON yields a decode error

use crate::decode::decode;
use crate::document::Document;
use crate::error::SdkError;
use crate::models::ModelsListResponse;

#[cfg(test)]
mod decode_tests {
    use super::*;

    #[test]
    fn test_empty_body_yields_default_document() {
        let document: Document = decode(b"").unwrap();

        assert!(document.is_empty());
    }

    #[test]
    fn test_empty_body_yields_default_typed_view() {
        let models: ModelsListResponse = decode(&[]).unwrap();

        assert_eq!(models, ModelsListResponse::default());
    }

    #[test]
    fn test_json_object_decodes_into_document() {
        let document: Document = decode(br#"{"id":"abc","total":3}"#).unwrap();

        assert_eq!(document.str("id"), Some("abc"));
        assert_eq!(document.i64("total"), Some(3));
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let result: Result<Document, _> = decode(b"<html>bad gateway</html>");

        match result {
            Err(SdkError::Decode { message, .. }) => {
                assert!(message.contains("<html>"), "preview missing: {message}");
            }
            other => panic!("Expected DecodeError, got: {:?}", other),
        }
    }

    #[test]
    fn test_array_body_does_not_fit_document() {
        let result: Result<Document, _> = decode(b"[1,2,3]");

        assert!(matches!(result, Err(SdkError::Decode { .. })));
    }

    #[test]
    fn test_long_bodies_are_truncated_in_message() {
        let body = format!("not json {}", "x".repeat(1000));

        let err = decode::<Document>(body.as_bytes()).unwrap_err();

        assert!(err.to_string().ends_with("..."));
        assert!(err.to_string().len() < 600);
    }

    #[test]
    fn test_whitespace_only_body_is_not_empty() {
        let result: Result<Document, _> = decode(b"  ");

        assert!(matches!(result, Err(SdkError::Decode { .. })));
    }
}
