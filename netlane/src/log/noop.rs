//! Logger that discards everything.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Silent logger for tests and embedders that do not want pipeline output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
