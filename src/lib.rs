//! # ai-stats
//!
//! Client for the AI Stats gateway, a hosted service that puts many model
//! providers behind one REST API.
//!
//! ## Key Features
//!
//! - **One envelope**: every endpoint goes through the same request builder
//!   ([`RequestEnvelope`]) with shared base URL and default headers
//! - **Declarative operations**: the whole API surface is a table of
//!   `(id, method, path)` rows in [`operations`]
//! - **Loose or strict responses**: decode into a [`Document`] or into one
//!   of the typed views in [`models`]
//! - **Structured errors**: [`SdkError`] separates transport, status, encode
//!   and decode failures
//!
//! The SDK performs exactly one HTTP round trip per call. It does not retry,
//! cache or stream.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ai_stats::{AiStats, ClientConfig};
//! use ai_stats::models::{ChatCompletionsRequest, ChatMessage};
//!
//! # async fn example() -> ai_stats::SdkResult<()> {
//! let client = AiStats::new(ClientConfig::new("your-api-key"))?;
//!
//! let request = ChatCompletionsRequest::new(
//!     "openai/gpt-4o-mini",
//!     vec![ChatMessage::user("Hello, how are you?")],
//! );
//! let response = client.generate_text(&request).await?;
//! println!("{}", response.first_content().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! Any endpoint without a named method can be reached through
//! [`AiStats::call`]:
//!
//! ```rust,no_run
//! use ai_stats::{AiStats, ClientConfig, Operation, OperationRequest};
//!
//! # async fn example() -> ai_stats::SdkResult<()> {
//! let client = AiStats::new(ClientConfig::new("your-api-key"))?;
//! let request = OperationRequest::new().path_param("provider_id", "openai");
//! let status = client.call(Operation::GetProviderDerankStatus, &request).await?;
//! println!("{:?}", status.get("derank"));
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod client;
pub mod config;
pub mod decode;
pub mod document;
pub mod envelope;
pub mod error;
pub mod models;
pub mod operations;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use client::AiStats;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use decode::decode;
pub use document::Document;
pub use envelope::{Method, RequestEnvelope, NO_BODY};
pub use error::{ErrorCategory, ErrorSeverity, SdkError, SdkResult};
pub use operations::{dispatch, Operation, OperationRequest, OperationSpec, OPERATIONS};
