//! Outcome of one network transfer.

use serde_json::Value;
use thiserror::Error;

/// Why a transfer produced no usable payload.
///
/// Messages are opaque text; nothing downstream inspects them beyond
/// logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {status} with empty body")]
    Status { status: u16 },

    #[error("Failed to read response: {0}")]
    Body(String),

    #[error("HTTP client unavailable: {0}")]
    Client(String),
}

/// Raw material handed to the response processor.
///
/// Any combination of fields may be set. `json` is the payload already
/// parsed as a JSON object, when the transfer mechanism does that.
#[derive(Debug, Clone, Default)]
pub struct TransferResult {
    pub data: Option<Vec<u8>>,
    pub error: Option<TransportError>,
    pub json: Option<Value>,
}

impl TransferResult {
    /// Wrap a response body, pre-parsing it when it is a JSON object.
    pub fn from_body(body: Vec<u8>) -> Self {
        let json = serde_json::from_slice::<Value>(&body)
            .ok()
            .filter(Value::is_object);
        Self {
            data: Some(body),
            error: None,
            json,
        }
    }

    /// A body without pre-parsed JSON.
    pub fn from_bytes(body: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Some(body.into()),
            ..Self::default()
        }
    }

    pub fn from_error(error: TransportError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Convert a transfer outcome, pre-parsing successful bodies.
    pub fn from_outcome(outcome: Result<Vec<u8>, TransportError>) -> Self {
        match outcome {
            Ok(body) => Self::from_body(body),
            Err(e) => Self::from_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_parses_objects_only() {
        let object = TransferResult::from_body(br#"{"a":1}"#.to_vec());
        assert_eq!(object.json.unwrap()["a"], 1);

        let array = TransferResult::from_body(b"[1,2]".to_vec());
        assert!(array.json.is_none());
        assert_eq!(array.data.as_deref(), Some(&b"[1,2]"[..]));

        let garbage = TransferResult::from_body(b"not json".to_vec());
        assert!(garbage.json.is_none());
        assert!(garbage.error.is_none());
    }

    #[test]
    fn test_from_outcome_error() {
        let result = TransferResult::from_outcome(Err(TransportError::Status { status: 503 }));
        assert!(result.data.is_none());
        assert_eq!(result.error, Some(TransportError::Status { status: 503 }));
        assert_eq!(
            result.error.unwrap().to_string(),
            "HTTP 503 with empty body"
        );
    }
}
