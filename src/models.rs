//! Strongly typed views over gateway request and response documents
//!
//! Every response field is optional because the gateway's contract is loose.
//! Fields the view does not name are kept in `extra`, so converting a
//! [`Document`](crate::Document) into a view and back loses nothing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Chat message roles accepted by `/chat/completions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

/// Chat message
///
/// `content` is either a string or an array of content parts, so it stays a
/// raw JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<Value>>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Value::String(content.into()),
            name: None,
            tool_call_id: None,
            tool_calls: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    /// Text content, when the content is a plain string
    pub fn text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

/// Body of `POST /chat/completions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionsRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Provider routing, debug and any other options
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatCompletionsRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// Token accounting returned by most generation endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatChoice {
    pub index: Option<u32>,
    pub message: Option<Map<String, Value>>,
    pub finish_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatChoice {
    /// Text of the choice's message, when it is a plain string
    pub fn content(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
    }
}

/// Response of `POST /chat/completions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatCompletionsResponse {
    pub id: Option<String>,
    pub object: Option<String>,
    pub created: Option<i64>,
    pub model: Option<String>,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatCompletionsResponse {
    /// Text of the first choice
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().and_then(ChatChoice::content)
    }
}

/// Body of `POST /embeddings`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsRequest {
    pub model: String,
    /// A string or an array of strings
    pub input: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Embedding {
    pub index: Option<u32>,
    pub object: Option<String>,
    pub embedding: Vec<f64>,
}

/// Response of `POST /embeddings`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingsResponse {
    pub object: Option<String>,
    pub model: Option<String>,
    pub data: Vec<Embedding>,
    pub usage: Option<Usage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /moderations`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationsRequest {
    pub model: String,
    /// A string or an array of text/image inputs
    pub input: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationResult {
    pub flagged: Option<bool>,
    pub categories: Map<String, Value>,
    pub category_scores: Map<String, Value>,
}

/// Response of `POST /moderations`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationsResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub results: Vec<ModerationResult>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModerationsResponse {
    /// True when any result was flagged
    pub fn any_flagged(&self) -> bool {
        self.results.iter().any(|r| r.flagged.unwrap_or(false))
    }
}

/// One entry of `GET /models`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    pub model_id: Option<String>,
    pub name: Option<String>,
    pub organisation_id: Option<String>,
    pub status: Option<String>,
    pub release_date: Option<String>,
    pub aliases: Vec<String>,
    pub endpoints: Vec<String>,
    pub input_types: Vec<String>,
    pub output_types: Vec<String>,
    pub providers: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `GET /models`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsListResponse {
    pub ok: Option<bool>,
    pub total: Option<u64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub models: Vec<Model>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the batch endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchResponse {
    pub id: Option<String>,
    pub object: Option<String>,
    pub endpoint: Option<String>,
    pub status: Option<String>,
    pub input_file_id: Option<String>,
    pub output_file_id: Option<String>,
    pub error_file_id: Option<String>,
    pub completion_window: Option<String>,
    pub created_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub request_counts: Option<Map<String, Value>>,
    pub metadata: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Error body returned by the gateway
///
/// The envelope never hands error bodies back, but callers that talk to the
/// gateway through other means can reuse this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub ok: Option<bool>,
    pub error: Option<String>,
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
