//! Scheduler sizing.

use crate::config::{SchedulerSettings, DEFAULT_LABEL_PREFIX};

/// Configuration for [`Scheduler`](super::Scheduler).
///
/// Built from the `[scheduler]` config section or with the `with_*`
/// helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Async worker threads driving the queue dispatchers.
    pub worker_threads: usize,
    /// Upper bound on threads running lane tasks.
    pub max_blocking_threads: usize,
    /// Tasks running at once on each global queue.
    pub global_width: usize,
    /// Tasks running at once on each local concurrent queue.
    pub local_width: usize,
    pub label_prefix: String,
    pub alias_mid_serial: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::from(&SchedulerSettings::default())
    }
}

impl From<&SchedulerSettings> for SchedulerConfig {
    fn from(settings: &SchedulerSettings) -> Self {
        Self {
            worker_threads: settings.worker_threads.max(1),
            max_blocking_threads: settings.max_blocking_threads.max(1),
            global_width: settings.global_width.max(1),
            local_width: settings.local_width.max(1),
            label_prefix: if settings.label_prefix.is_empty() {
                DEFAULT_LABEL_PREFIX.to_string()
            } else {
                settings.label_prefix.clone()
            },
            alias_mid_serial: settings.alias_mid_serial,
        }
    }
}

impl SchedulerConfig {
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.max(1);
        self
    }

    pub fn with_max_blocking_threads(mut self, threads: usize) -> Self {
        self.max_blocking_threads = threads.max(1);
        self
    }

    pub fn with_global_width(mut self, width: usize) -> Self {
        self.global_width = width.max(1);
        self
    }

    pub fn with_local_width(mut self, width: usize) -> Self {
        self.local_width = width.max(1);
        self
    }

    pub fn with_alias_mid_serial(mut self, alias: bool) -> Self {
        self.alias_mid_serial = alias;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_clamp_to_one() {
        let config = SchedulerConfig::default()
            .with_worker_threads(0)
            .with_global_width(0)
            .with_local_width(3);
        assert_eq!(config.worker_threads, 1);
        assert_eq!(config.global_width, 1);
        assert_eq!(config.local_width, 3);
    }

    #[test]
    fn test_from_settings_fills_empty_prefix() {
        let settings = SchedulerSettings {
            label_prefix: String::new(),
            ..SchedulerSettings::default()
        };
        let config = SchedulerConfig::from(&settings);
        assert_eq!(config.label_prefix, DEFAULT_LABEL_PREFIX);
    }
}
