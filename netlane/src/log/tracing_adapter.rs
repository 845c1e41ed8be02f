//! Adapter from [`Logger`] to the `tracing` crate.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger that forwards every line to `tracing`.
///
/// Events are emitted under the `netlane` target so they can be filtered
/// with `RUST_LOG=netlane=debug` independently of other crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "netlane", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "netlane", "{}", args),
            LogLevel::Info => tracing::info!(target: "netlane", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "netlane", "{}", args),
            LogLevel::Error => tracing::error!(target: "netlane", "{}", args),
        }
    }
}
