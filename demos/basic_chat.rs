//! Basic chat example against the AI Stats gateway.
//!
//! This example shows how to:
//! - Build a client from environment variables
//! - Send a non-streaming chat completion
//! - Read the reply and token usage
//!
//! # Running
//!
//! ```bash
//! export AI_STATS_API_KEY="..."
//! RUST_LOG=ai_stats=debug cargo run --example basic_chat
//! ```

use ai_stats::models::{ChatCompletionsRequest, ChatMessage};
use ai_stats::AiStats;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Reads AI_STATS_API_KEY and optional AI_STATS_BASE_URL / AI_STATS_TIMEOUT_SECS
    let client = AiStats::from_env()?;

    let request = ChatCompletionsRequest::new(
        "openai/gpt-4o-mini",
        vec![
            ChatMessage::system("You are a helpful assistant. Be concise."),
            ChatMessage::user("What is the capital of France? Answer in one sentence."),
        ],
    )
    .with_max_output_tokens(64);

    println!("Sending request to {}...", client.envelope().base_url());

    let response = client.generate_text(&request).await?;

    println!(
        "\nResponse: {}",
        response.first_content().unwrap_or("<no text content>")
    );

    if let Some(usage) = &response.usage {
        println!(
            "\nToken usage: {} input + {} output = {} total",
            usage.prompt_tokens.unwrap_or_default(),
            usage.completion_tokens.unwrap_or_default(),
            usage.total_tokens.unwrap_or_default()
        );
    }

    Ok(())
}
