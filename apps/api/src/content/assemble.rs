//! Typed Assembler helpers: project a loosely-shaped payload onto strict fields.
//!
//! Every reader takes a named default and never fails. List-of-object fields
//! decode element by element; a malformed element is dropped with a warning
//! and its valid siblings are kept.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::content::parser::Payload;

/// String field, or `default` when absent or not a string.
pub fn text(payload: &Payload, key: &str, default: impl Into<String>) -> String {
    match payload.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => default.into(),
    }
}

/// List of strings. Non-string elements are skipped; an absent, mistyped or
/// empty list yields `default`.
pub fn text_list(payload: &Payload, key: &str, default: &[&str]) -> Vec<String> {
    let items: Vec<String> = match payload.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    if items.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

/// List of structured elements, each decoded independently.
pub fn object_list<T: DeserializeOwned>(payload: &Payload, key: &str) -> Vec<T> {
    let Some(Value::Array(values)) = payload.get(key) else {
        return Vec::new();
    };

    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match T::deserialize(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping invalid {key}[{index}]: {e}");
                None
            }
        })
        .collect()
}

/// Like `object_list`, but falls back to `default()` when nothing valid survives.
pub fn object_list_or<T, F>(payload: &Payload, key: &str, default: F) -> Vec<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    let items = object_list(payload, key);
    if items.is_empty() {
        default()
    } else {
        items
    }
}

/// Cached `data` value as a payload. Anything that is not an object reads as
/// an empty payload, so every field takes its default.
pub fn as_payload(data: &Value) -> Payload {
    match data {
        Value::Object(map) => map.clone(),
        _ => Payload::new(),
    }
}
