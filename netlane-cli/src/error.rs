//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use netlane::config::ConfigFileError;
use netlane::scheduler::SchedulerError;
use netlane::service::ServiceError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create service
    ServiceCreation(ServiceError),
    /// Lane work failed
    Scheduler(SchedulerError),
    /// A request produced no model
    NoModel { route: &'static str },
    /// No answer arrived in time
    Timeout { route: &'static str, secs: u64 },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::NoModel { .. } | CliError::Timeout { .. } => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. Server unreachable: check [environment] in config.ini");
                eprintln!("  2. Try a mock backend: --backend mock_sync");
                eprintln!("  3. Run with --debug and check the log file for details");
            }
            CliError::ServiceCreation(ServiceError::BackendError(_)) => {
                eprintln!();
                eprintln!("The HTTP client could not be created. A mock backend");
                eprintln!("(--backend mock_sync) does not need one.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ServiceCreation(e) => write!(f, "Failed to create service: {}", e),
            CliError::Scheduler(e) => write!(f, "Scheduler error: {}", e),
            CliError::NoModel { route } => write!(f, "{} returned no model", route),
            CliError::Timeout { route, secs } => {
                write!(f, "{} did not answer within {}s", route, secs)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ServiceCreation(e) => Some(e),
            CliError::Scheduler(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::ServiceCreation(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<SchedulerError> for CliError {
    fn from(e: SchedulerError) -> Self {
        CliError::Scheduler(e)
    }
}
