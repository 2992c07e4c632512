use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Conversation message kinds (high-level, provider-agnostic).
///
/// A conversation is an ordered sequence of these; role ordering is the
/// caller's business, the client never reorders or mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Message {
    /// System prompt (instructions)
    System { content: String },

    /// User/Human message
    Human { content: String },

    /// Assistant/AI message
    #[serde(rename = "ai")]
    AI { content: String },

    /// User text paired with an image reference
    Image { text: String, image_url: String },

    /// Tool invocation result
    Tool { id: String, name: String, args: Value },
}

impl Message {
    /// Create system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Create human message
    pub fn human(content: impl Into<String>) -> Self {
        Self::Human {
            content: content.into(),
        }
    }

    /// Create AI message
    pub fn ai(content: impl Into<String>) -> Self {
        Self::AI {
            content: content.into(),
        }
    }

    /// Create image message (user text + image reference)
    pub fn image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self::Image {
            text: text.into(),
            image_url: image_url.into(),
        }
    }

    /// Create tool result message
    pub fn tool(id: impl Into<String>, name: impl Into<String>, args: Value) -> Self {
        Self::Tool {
            id: id.into(),
            name: name.into(),
            args,
        }
    }

    /// Get role as string
    pub fn role(&self) -> &str {
        match self {
            Self::System { .. } => "system",
            Self::Human { .. } | Self::Image { .. } => "user",
            Self::AI { .. } => "assistant",
            Self::Tool { .. } => "tool",
        }
    }

    /// Serialize to the provider's `{role, content}` wire shape.
    ///
    /// Pure data transformation: no I/O, no validation, and calling it twice
    /// yields identical values. Images expand to a multipart content array.
    pub fn to_payload(&self) -> Value {
        match self {
            Self::System { content } => json!({
                "role": "system",
                "content": content,
            }),
            Self::Human { content } => json!({
                "role": "user",
                "content": content,
            }),
            Self::AI { content } => json!({
                "role": "assistant",
                "content": content,
            }),
            Self::Image { text, image_url } => json!({
                "role": "user",
                "content": [
                    {
                        "type": "text",
                        "text": text,
                    },
                    {
                        "type": "image_url",
                        "image_url": {
                            "url": image_url,
                        },
                    },
                ],
            }),
            Self::Tool { id, name, args } => json!({
                "role": "tool",
                "tool_call_id": id,
                "name": name,
                "content": args.to_string(),
            }),
        }
    }
}
