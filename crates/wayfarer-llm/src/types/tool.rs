use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Tool/function made available to the model.
///
/// Owned by the caller's configuration; the client only reads it when
/// building request payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,

    /// JSON Schema for the tool's parameters
    pub parameters: Value,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Serialize to the provider's tools-array entry shape.
    pub fn to_payload(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            },
        })
    }
}
