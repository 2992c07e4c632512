//! Wire shapes consumed from the chat-completions endpoint.

use serde::Deserialize;
use serde_json::Value;

use crate::error::InferenceError;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<WireUsage>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Choice {
    pub message: WireMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireToolCall {
    pub function: WireFunction,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireFunction {
    pub name: String,

    /// Usually a JSON-encoded string, but some gateways inline an object.
    pub arguments: Value,
}

impl WireFunction {
    pub fn arguments_value(&self) -> Result<Value, InferenceError> {
        match &self.arguments {
            Value::String(raw) => serde_json::from_str(raw).map_err(|e| {
                InferenceError::Decode(format!("tool call arguments are not valid JSON: {e}"))
            }),
            other => Ok(other.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiError {
    pub message: String,
}
