//! Server error envelope.
//!
//! Servers report failures either flat, `{"error": "<text>"}`, which every
//! model decodes directly, or nested, `{"error": {"message": "<text>"}}`.
//! The nested shape is rewritten to the flat one before decoding.

use serde_json::{json, Value};

pub const KEY_ERROR: &str = "error";
pub const KEY_MESSAGE: &str = "message";

/// Message of a nested error envelope, if `json` is one.
pub fn nested_message(json: &Value) -> Option<&str> {
    json.get(KEY_ERROR)?
        .as_object()?
        .get(KEY_MESSAGE)?
        .as_str()
}

/// Flat replacement payload for a nested envelope.
///
/// Returns `None` when `json` carries no nested envelope, in which case
/// the original payload is decoded unchanged.
pub fn flatten(json: &Value) -> Option<Vec<u8>> {
    let message = nested_message(json)?;
    serde_json::to_vec(&json!({ KEY_ERROR: message })).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_envelope_flattened() {
        let json = json!({"error": {"message": "token expired", "code": 401}});
        let bytes = flatten(&json).unwrap();
        let flat: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(flat, json!({"error": "token expired"}));
    }

    #[test]
    fn test_flat_error_untouched() {
        assert!(flatten(&json!({"error": "plain"})).is_none());
    }

    #[test]
    fn test_non_string_message_ignored() {
        assert!(flatten(&json!({"error": {"message": 42}})).is_none());
        assert!(flatten(&json!({"error": {"detail": "x"}})).is_none());
        assert!(flatten(&json!({"isWidget": true})).is_none());
    }
}
