//! Response schemas in the OpenAPI subset Gemini accepts.

use serde_json::{Map, Value, json};

pub(super) fn string(description: &str) -> Value {
    json!({"type": "STRING", "description": description})
}

pub(super) fn string_array(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "description": description,
        "items": {"type": "STRING"},
    })
}

pub(super) fn object(properties: &[(&str, Value)], required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .iter()
        .map(|(name, schema)| (name.to_string(), schema.clone()))
        .collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}
