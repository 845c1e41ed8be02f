//! Service error types.

use crate::backend::BackendError;
use crate::scheduler::SchedulerError;
use std::fmt;

/// Errors that can occur while assembling a [`NetworkService`](super::NetworkService).
///
/// Requests themselves never fail with these; they complete with `None`.
#[derive(Debug)]
pub enum ServiceError {
    /// Failed to start the scheduler
    SchedulerError(SchedulerError),
    /// Failed to create a backend
    BackendError(BackendError),
    /// Invalid configuration
    ConfigError(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchedulerError(e) => write!(f, "Scheduler error: {}", e),
            Self::BackendError(e) => write!(f, "Backend error: {}", e),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SchedulerError(e) => Some(e),
            Self::BackendError(e) => Some(e),
            Self::ConfigError(_) => None,
        }
    }
}

impl From<SchedulerError> for ServiceError {
    fn from(e: SchedulerError) -> Self {
        Self::SchedulerError(e)
    }
}

impl From<BackendError> for ServiceError {
    fn from(e: BackendError) -> Self {
        Self::BackendError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TransportError;
    use std::error::Error;

    #[test]
    fn test_display() {
        let err = ServiceError::ConfigError("width must be positive".to_string());
        assert_eq!(err.to_string(), "Configuration error: width must be positive");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_backend_error_keeps_source() {
        let err: ServiceError =
            BackendError::Client(TransportError::Client("tls".to_string())).into();
        assert!(err.to_string().starts_with("Backend error:"));
        assert!(err.source().is_some());
    }
}
