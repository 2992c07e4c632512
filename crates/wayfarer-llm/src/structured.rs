//! Structured output: schema-derived instructions and response validation.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::InferenceError;

/// Caller-supplied JSON Schema the model's reply must conform to.
///
/// The same `serde_json::Value` currency as [`crate::types::Tool`]
/// parameters. The client embeds [`ResponseSchema::format_instructions`]
/// into the System message and runs [`ResponseSchema::validate`] over the
/// returned content. Validation is structural and strict: a type mismatch
/// or missing field is a terminal error, never coerced.
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    schema: Value,
}

impl ResponseSchema {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Formatting instructions the model is expected to obey.
    pub fn format_instructions(&self) -> String {
        format!(
            "Respond with a single JSON object that conforms to the following JSON schema:\n{}\nDo not include any text outside the JSON object.",
            self.schema
        )
    }

    /// Parse `content` as JSON and check it against the schema.
    ///
    /// When an object schema carries no explicit `required` array, every
    /// declared property is treated as required.
    pub fn validate(&self, content: &str) -> Result<Value, InferenceError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| InferenceError::Decode(format!("structured output is not valid JSON: {e}")))?;
        check(&self.schema, &value, "$")?;
        Ok(value)
    }

    /// Validate `content` against the schema, then deserialize it.
    pub fn validate_as<T: DeserializeOwned>(&self, content: &str) -> Result<T, InferenceError> {
        let value = self.validate(content)?;
        serde_json::from_value(value)
            .map_err(|e| InferenceError::Decode(format!("structured output did not deserialize: {e}")))
    }
}

fn check(schema: &Value, value: &Value, path: &str) -> Result<(), InferenceError> {
    let Some(ty) = schema.get("type").and_then(Value::as_str) else {
        return Ok(());
    };
    match ty {
        "object" => {
            let Some(object) = value.as_object() else {
                return Err(mismatch(path, "object", value));
            };
            let properties = schema.get("properties").and_then(Value::as_object);
            let required: Vec<&str> = match schema.get("required").and_then(Value::as_array) {
                Some(names) => names.iter().filter_map(Value::as_str).collect(),
                None => properties
                    .map(|props| props.keys().map(String::as_str).collect())
                    .unwrap_or_default(),
            };
            for name in required {
                if !object.contains_key(name) {
                    return Err(InferenceError::SchemaValidation(format!(
                        "missing required field `{path}.{name}`"
                    )));
                }
            }
            if let Some(properties) = properties {
                for (name, sub) in properties {
                    if let Some(field) = object.get(name) {
                        check(sub, field, &format!("{path}.{name}"))?;
                    }
                }
            }
            Ok(())
        }
        "array" => {
            let Some(items) = value.as_array() else {
                return Err(mismatch(path, "array", value));
            };
            if let Some(item_schema) = schema.get("items") {
                for (index, item) in items.iter().enumerate() {
                    check(item_schema, item, &format!("{path}[{index}]"))?;
                }
            }
            Ok(())
        }
        "string" if value.is_string() => Ok(()),
        "integer" if value.as_i64().is_some() || value.as_u64().is_some() => Ok(()),
        "number" if value.is_number() => Ok(()),
        "boolean" if value.is_boolean() => Ok(()),
        "null" if value.is_null() => Ok(()),
        "string" | "integer" | "number" | "boolean" | "null" => Err(mismatch(path, ty, value)),
        _ => Ok(()),
    }
}

fn mismatch(path: &str, expected: &str, got: &Value) -> InferenceError {
    InferenceError::SchemaValidation(format!("`{path}` should be {expected}, got {got}"))
}
