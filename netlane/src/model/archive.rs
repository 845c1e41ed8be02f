//! Archived (persisted) form of models.
//!
//! An archive is a flat JSON object keyed by field name. Restoring is
//! lenient: missing or mistyped entries fall back to the field's zero
//! value, and the result goes through version resolution like a decode.

use serde_json::{Map, Value};
use thiserror::Error;

use super::Model;

/// Archive key/value pairs.
pub type ArchiveMap = Map<String, Value>;

pub const KEY_ERROR: &str = "error";
pub const KEY_VERSION: &str = "version";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Archive is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive must be a JSON object")]
    NotAnObject,
}

/// Serialize a model's archive.
pub fn to_bytes<M: Model>(model: &M) -> Vec<u8> {
    // A map of plain JSON values always serializes.
    serde_json::to_vec(&Value::Object(model.archive())).unwrap_or_default()
}

/// Restore a model from [`to_bytes`] output.
pub fn from_bytes<M: Model>(bytes: &[u8]) -> Result<M, ArchiveError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(M::restore(&map)),
        _ => Err(ArchiveError::NotAnObject),
    }
}

pub(crate) fn get_bool(map: &ArchiveMap, key: &str) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or_default()
}

pub(crate) fn get_i64(map: &ArchiveMap, key: &str) -> i64 {
    map.get(key).and_then(Value::as_i64).unwrap_or_default()
}

pub(crate) fn get_f32(map: &ArchiveMap, key: &str) -> f32 {
    map.get(key)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or_default()
}

pub(crate) fn get_string(map: &ArchiveMap, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

pub(crate) fn get_strings(map: &ArchiveMap, key: &str) -> Vec<String> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
