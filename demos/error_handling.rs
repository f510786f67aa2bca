//! Error handling example demonstrating error variants, categories and retry hints.
//!
//! This example shows how to:
//! - Tell transport, status, decode and configuration failures apart
//! - Use error categories for routing decisions
//! - Decide whether a failed call is worth repeating
//! - Convert errors to user-friendly messages
//!
//! # Running
//!
//! ```bash
//! cargo run --example error_handling
//!
//! # To trigger a real 401 from the gateway:
//! cargo run --example error_handling -- --live
//! ```
//!
//! The SDK never retries by itself; `is_retryable()` is a hint for callers.

use ai_stats::{
    AiStats, ClientConfig, ErrorCategory, Operation, OperationRequest, SdkError,
};
use std::time::Duration;

fn sample_errors() -> Vec<(&'static str, SdkError)> {
    let bad_json = serde_json::from_str::<serde_json::Value>("{oops").err();
    let mut errors = vec![
        (
            "Configuration",
            SdkError::configuration("AI Stats API key is required"),
        ),
        ("Unauthorized", SdkError::http_status(401, "Unauthorized")),
        ("Rate limited", SdkError::http_status(429, "Too Many Requests")),
        ("Not found", SdkError::http_status(404, "Not Found")),
        ("Gateway down", SdkError::http_status(502, "Bad Gateway")),
        (
            "Transport",
            SdkError::transport("connection refused", None),
        ),
        (
            "Missing path parameter",
            SdkError::missing_path_parameter("getVideo", "video_id"),
        ),
    ];
    if let Some(source) = bad_json {
        errors.push(("Decode", SdkError::decode("response was not JSON", source)));
    }
    errors
}

fn print_error_info(name: &str, error: &SdkError) {
    println!("{}:", name);
    println!("  Display: {}", error);
    println!("  Status: {:?}", error.status());
    println!("  Category: {:?}", error.category());
    println!("  Severity: {:?}", error.severity());
    println!("  Retryable: {}", error.is_retryable());
    println!("  User message: {}", error.user_message());
    println!();
}

fn action_for(error: &SdkError) -> &'static str {
    match error.category() {
        ErrorCategory::Client => "Fix the request or configuration",
        ErrorCategory::Transient => "Wait, then call again",
        ErrorCategory::External => "Log and check gateway status",
        ErrorCategory::Internal => "Report a bug",
    }
}

async fn demonstrate_live_error() {
    println!("=== Live call with an invalid key ===\n");

    let config = ClientConfig::new("invalid-key").with_timeout(Duration::from_secs(15));
    let client = match AiStats::new(config) {
        Ok(client) => client,
        Err(e) => {
            println!("Could not build client: {e}");
            return;
        }
    };

    match client.call(Operation::GetCredits, &OperationRequest::new()).await {
        Ok(document) => println!("Unexpected success: {:?}", document),
        Err(error) => {
            print_error_info("Live error", &error);
            println!("Action: {}", action_for(&error));
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let run_live = std::env::args().any(|a| a == "--live");

    println!("=== Error Variants and Categories ===\n");
    for (name, error) in sample_errors() {
        print_error_info(name, &error);
    }

    println!("=== Category-Based Routing ===\n");
    for (_, error) in sample_errors() {
        println!("  {} -> {}", error, action_for(&error));
    }
    println!();

    if run_live {
        demonstrate_live_error().await;
    } else {
        println!("=== Live Test Skipped ===\n");
        println!("Run with --live to call the gateway with an invalid key:");
        println!("  cargo run --example error_handling -- --live\n");
    }

    Ok(())
}
