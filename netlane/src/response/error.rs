use thiserror::Error;

use crate::backend::TransportError;

/// Why a transfer did not produce a model.
///
/// A server-reported error is not one of these: it decodes into the
/// model's `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("Transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("No data returned")]
    NoData,

    #[error("Failed to decode {model}: {reason}")]
    Decode { model: &'static str, reason: String },
}
