use async_trait::async_trait;
use serde_json::Value;

use crate::error::InferenceError;
use crate::types::{Message, TokenUsage};

/// Outcome of one inference call.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain text from the model.
    Text(String),

    /// Content parsed as generic JSON (json mode).
    Json(Value),

    /// The model asked for a tool invocation instead of answering.
    ToolCall {
        /// Freshly generated per response; the provider does not supply one
        /// on this path.
        id: String,
        name: String,
        arguments: Value,
    },
}

impl Reply {
    /// Get as plain text (if this is a text reply)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// The invocation contract consumed by the agent loop.
///
/// Implementations own the transport, rate limiting, and retries; callers
/// only ever see an ordered message sequence going in and a typed
/// [`Reply`] or [`InferenceError`] coming out.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Free-text completion.
    async fn invoke(&self, messages: &[Message]) -> Result<Reply, InferenceError>;

    /// JSON-mode completion (`response_format: json_object`).
    async fn invoke_json(&self, messages: &[Message]) -> Result<Reply, InferenceError>;

    /// Usage reported by the most recent call, if any.
    fn last_usage(&self) -> Option<TokenUsage>;
}
