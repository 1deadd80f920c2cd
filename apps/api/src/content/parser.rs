//! Response Parser: turns raw model text into a JSON object payload.
//!
//! Decode failures never escape: the caller supplies a fallback built purely
//! from the request context, and that payload is used instead.

use serde_json::{Map, Value};
use tracing::error;

pub type Payload = Map<String, Value>;

/// Removes a fenced-block wrapper. When the trimmed text begins with a fence
/// marker, the first and last lines are dropped.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    if !text.starts_with("```") {
        return text;
    }

    let Some(first_break) = text.find('\n') else {
        return "";
    };
    let body = &text[first_break + 1..];
    match body.rfind('\n') {
        Some(last_break) => body[..last_break].trim(),
        None => "",
    }
}

/// Strictly decodes `text` as a JSON object.
pub fn decode_object(text: &str) -> Result<Payload, serde_json::Error> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::de::Error::custom(format!(
            "expected a JSON object, found {}",
            kind_of(&other)
        ))),
    }
}

/// Parses model output into a payload, substituting `fallback()` when the
/// text is not a JSON object.
pub fn parse_payload<F>(raw: &str, fallback: F) -> Payload
where
    F: FnOnce() -> Payload,
{
    let cleaned = strip_code_fence(raw);
    match decode_object(cleaned) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Failed to parse LLM JSON, using fallback payload: {e}");
            fallback()
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Converts a `json!({...})` literal into a payload. Non-objects become empty.
pub fn payload_from(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => Payload::new(),
    }
}
