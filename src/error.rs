//! Error types for gateway operations.
//!
//! Every failure an operation can produce is a variant of [`SdkError`]:
//! - Request bodies that cannot be encoded as JSON
//! - Transport failures (DNS, refused connections, timeouts, unreadable bodies)
//! - Non-success HTTP statuses
//! - Response bodies that do not decode into the requested shape
//! - Client-side misconfiguration (API key, headers, base URL, path parameters)
//!
//! None of these are recovered inside the crate. A failed call never carries
//! partial data.
//!
//! # Error Handling Example
//!
//! ```rust,no_run
//! use ai_stats::{SdkError, error::ErrorCategory};
//!
//! fn handle_error(err: SdkError) {
//!     if let Some(status) = err.status() {
//!         println!("Gateway answered {status}");
//!     }
//!
//!     match err.category() {
//!         ErrorCategory::Transient => println!("Temporary issue, try again later"),
//!         ErrorCategory::Client => println!("Fix the request and try again"),
//!         _ => println!("{}", err.user_message()),
//!     }
//! }
//! ```

use crate::logging::{log_error, log_warn};
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for routing and handling decisions.
///
/// Use [`SdkError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The gateway or the network failed.
    External,

    /// Something went wrong inside the SDK itself.
    Internal,

    /// The caller made a mistake they can fix (API key, parameters, headers).
    Client,

    /// Temporary failures such as rate limits, timeouts and unavailable upstreams.
    Transient,
}

/// Severity level for logging and alerting decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed but the process is stable.
    Error,

    /// Unexpected but recoverable situation.
    Warning,

    /// Expected failure (e.g. not found).
    Info,
}

// ============================================================================
// SDK Error types
// ============================================================================

/// Convenient result type for gateway operations.
pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Errors that can occur while calling the gateway.
///
/// | Variant | Category | Retryable |
/// |---------|----------|-----------|
/// | `Serialization` | Client | No |
/// | `Transport` | External | Yes |
/// | `HttpStatus` | by status | 408, 429, 5xx |
/// | `Decode` | External | No |
/// | `Configuration` | Client | No |
/// | `MissingPathParameter` | Client | No |
/// | `UnknownOperation` | Client | No |
///
/// "Retryable" is advisory. The SDK never retries on its own.
#[derive(Error, Debug)]
pub enum SdkError {
    /// The request body could not be encoded as JSON.
    #[error("Request serialization failed: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be sent, or no complete response was received.
    #[error("Transport failed: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The gateway answered with a non-success status.
    ///
    /// The response body is intentionally not carried.
    #[error("Request failed: {status} {status_text}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase, empty when the status has none.
        status_text: String,
    },

    /// The response body is not valid JSON or does not fit the requested shape.
    #[error("Response decoding failed: {message}")]
    Decode {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Client configuration is invalid or incomplete.
    #[error("Client configuration error: {message}")]
    Configuration { message: String },

    /// A path template placeholder had no value.
    #[error("Operation {operation} is missing path parameter '{parameter}'")]
    MissingPathParameter {
        operation: &'static str,
        parameter: String,
    },

    /// No operation is registered under the given id.
    #[error("Unknown operation: {id}")]
    UnknownOperation { id: String },
}

impl SdkError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Serialization { .. } => ErrorCategory::Client,
            Self::Transport { .. } => ErrorCategory::External,
            Self::HttpStatus { status, .. } => match status {
                408 | 429 | 502..=504 => ErrorCategory::Transient,
                400..=499 => ErrorCategory::Client,
                _ => ErrorCategory::External,
            },
            Self::Decode { .. } => ErrorCategory::External,
            Self::Configuration { .. } => ErrorCategory::Client,
            Self::MissingPathParameter { .. } => ErrorCategory::Client,
            Self::UnknownOperation { .. } => ErrorCategory::Client,
        }
    }

    /// Get the error severity for logging and alerting.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Serialization { .. } => ErrorSeverity::Error,
            Self::Transport { .. } => ErrorSeverity::Error,
            Self::HttpStatus { status, .. } => match status {
                404 => ErrorSeverity::Info,
                400..=499 => ErrorSeverity::Warning,
                _ => ErrorSeverity::Error,
            },
            Self::Decode { .. } => ErrorSeverity::Warning,
            Self::Configuration { .. } => ErrorSeverity::Error,
            Self::MissingPathParameter { .. } => ErrorSeverity::Error,
            Self::UnknownOperation { .. } => ErrorSeverity::Error,
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::HttpStatus { status, .. } => matches!(status, 408 | 429 | 500..=599),
            _ => false,
        }
    }

    /// HTTP status carried by the error, if the gateway answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Convert to a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Serialization { .. } => "The request could not be encoded".to_string(),
            Self::Transport { .. } => {
                "Unable to reach the AI gateway. Please try again".to_string()
            }
            Self::HttpStatus { status, .. } => match status {
                401 | 403 => "Authentication failed. Please check your API key".to_string(),
                404 => "The requested resource was not found".to_string(),
                429 => "The gateway is busy. Please wait and try again".to_string(),
                500..=599 => "The AI gateway reported an internal problem".to_string(),
                _ => format!("The AI gateway rejected the request ({status})"),
            },
            Self::Decode { .. } => "Received an invalid response from the AI gateway".to_string(),
            Self::Configuration { .. } => {
                "SDK configuration issue. Please check your settings".to_string()
            }
            Self::MissingPathParameter { parameter, .. } => {
                format!("A required identifier is missing: {parameter}")
            }
            Self::UnknownOperation { .. } => "The requested operation does not exist".to_string(),
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        let message = message.into();
        log_error!(
            error_type = "serialization",
            message = %message,
            source = %source,
            "Gateway request body could not be encoded"
        );
        Self::Serialization { message, source }
    }

    pub fn transport(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "transport",
            message = %message,
            has_source = source.is_some(),
            "Gateway request could not be completed"
        );
        Self::Transport { message, source }
    }

    pub fn http_status(status: u16, status_text: impl Into<String>) -> Self {
        let status_text = status_text.into();
        log_warn!(
            error_type = "http_status",
            status = status,
            status_text = %status_text,
            "Gateway returned a non-success status"
        );
        Self::HttpStatus {
            status,
            status_text,
        }
    }

    pub fn decode(message: impl Into<String>, source: serde_json::Error) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "decode",
            message = %message,
            source = %source,
            "Gateway response body could not be decoded"
        );
        Self::Decode { message, source }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration",
            message = %message,
            "SDK configuration validation failed"
        );
        Self::Configuration { message }
    }

    pub fn missing_path_parameter(operation: &'static str, parameter: impl Into<String>) -> Self {
        let parameter = parameter.into();
        log_error!(
            error_type = "missing_path_parameter",
            operation = operation,
            parameter = %parameter,
            "Path template could not be resolved"
        );
        Self::MissingPathParameter {
            operation,
            parameter,
        }
    }

    pub fn unknown_operation(id: impl Into<String>) -> Self {
        let id = id.into();
        log_error!(
            error_type = "unknown_operation",
            id = %id,
            "No gateway operation registered under this id"
        );
        Self::UnknownOperation { id }
    }
}
