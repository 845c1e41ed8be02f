//! Request construction errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    /// The configured base URL is unusable.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The route payload could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The token for a staged request could not be persisted.
    #[error("Failed to stage token: {0}")]
    Token(#[from] crate::settings::SettingsError),
}
