//! Logger that keeps every line in memory.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Captures log lines so callers can inspect what the pipeline reported.
///
/// Used by the test suites to observe behavior that is only visible through
/// logging (backend switches, swallowed failures).
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Messages at or above `level`.
    pub fn messages_at_least(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.level >= level)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Whether any captured message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|r| r.message.contains(needle))
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        // A panicking writer cannot leave a half-pushed record behind.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        self.lock().push(LogRecord {
            level,
            message: args.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{log_info, log_warn};

    #[test]
    fn test_records_lines_in_order() {
        let logger = RecordingLogger::new();
        log_info!(logger, "first {}", 1);
        log_warn!(logger, "second");

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first 1");
        assert_eq!(records[1].level, LogLevel::Warn);
    }

    #[test]
    fn test_filters_by_level() {
        let logger = RecordingLogger::new();
        log_info!(logger, "info line");
        log_warn!(logger, "warn line");

        assert_eq!(logger.messages_at_least(LogLevel::Warn), vec!["warn line"]);
        assert!(logger.contains("info"));

        logger.clear();
        assert!(logger.records().is_empty());
    }
}
