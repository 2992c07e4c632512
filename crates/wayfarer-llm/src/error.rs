//! Inference error taxonomy.

use thiserror::Error;

/// Errors surfaced by the inference client.
///
/// Only [`InferenceError::Transport`] is transient: the retry policy
/// re-attempts it and nothing else. Everything the provider said in a
/// response it actually delivered (an `error` field, a schema mismatch,
/// malformed content) is terminal and reported to the caller unchanged.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Network-level failure: connection refused, reset, DNS, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with an application-level error.
    #[error("provider error (status {status:?}): {message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode model response: {0}")]
    Decode(String),

    /// Structured output did not conform to the caller's schema.
    #[error("schema validation failed: {0}")]
    SchemaValidation(String),

    /// Every retry attempt hit a transport failure.
    #[error("all {attempts} attempts failed, last error: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    /// `invoke` was called with no messages.
    #[error("conversation is empty")]
    EmptyConversation,

    /// Client construction or configuration problem.
    #[error("configuration error: {0}")]
    Config(String),
}

impl InferenceError {
    /// Whether the retry policy should re-attempt after this error.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
