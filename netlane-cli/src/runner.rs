//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and service creation
//! to reduce duplication across command handlers.

use crate::error::CliError;
use netlane::backend::BackendKind;
use netlane::config::ConfigFile;
use netlane::log::TracingLogger;
use netlane::logging::{init_logging, LoggingGuard, LoggingOptions};
use netlane::service::{build_service, ServiceComponents};
use std::sync::Arc;
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    _logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    pub fn with_debug(debug_mode: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let options = LoggingOptions {
            file: Some(config.logging.file.clone()),
            verbose: debug_mode,
        };
        let logging_guard =
            init_logging(&options).map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("netlane v{}", netlane::VERSION);
        info!("netlane CLI: {} command", command);
    }

    /// Build the service with the requested (or selected) backend.
    pub fn create_service(
        &self,
        backend: Option<BackendKind>,
    ) -> Result<ServiceComponents, CliError> {
        // Library diagnostics go through tracing
        let logger = Arc::new(TracingLogger::new());

        build_service(&self.config, backend, logger)
            .map_err(CliError::ServiceCreation)
            .inspect(|c| info!("Service created with {} backend", c.backend_kind))
    }
}
