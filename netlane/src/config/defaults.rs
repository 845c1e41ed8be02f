//! Default values and constants for all configuration settings.
//!
//! Contains the `DEFAULT_*` constants, CPU-aware helpers,
//! and the `ConfigFile::default()` implementation.

use super::settings::*;
use crate::backend::BackendKind;
use crate::route::Profile;

// =============================================================================
// CPU helpers
// =============================================================================

/// Get the number of available CPU cores.
pub fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Default bound on threads executing lane tasks: twice the core count, at least 8.
pub fn default_max_blocking_threads() -> usize {
    (num_cpus() * 2).max(MIN_BLOCKING_THREADS)
}

// =============================================================================
// Environment
// =============================================================================

pub const DEFAULT_DOMAIN: &str = "example.com";
pub const DEFAULT_API_VERSION: &str = "/v1";

// =============================================================================
// Network
// =============================================================================

/// Transfer timeout in seconds.
pub const DEFAULT_NETWORK_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Scheduler
// =============================================================================

pub const MIN_BLOCKING_THREADS: usize = 8;
pub const DEFAULT_LABEL_PREFIX: &str = "com.netlane.";

// =============================================================================
// Files
// =============================================================================

pub const CONFIG_DIR_NAME: &str = ".netlane";
pub const CONFIG_FILE_NAME: &str = "config.ini";
pub const SETTINGS_FILE_NAME: &str = "settings.ini";

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            environment: EnvironmentSettings::default(),
            network: NetworkSettings {
                backend: BackendKind::Default,
                timeout: DEFAULT_NETWORK_TIMEOUT_SECS,
            },
            auth: AuthSettings::default(),
            scheduler: SchedulerSettings::default(),
            store: StoreSettings {
                file: config_dir.join(SETTINGS_FILE_NAME),
            },
            logging: LoggingSettings {
                file: config_dir.join(crate::logging::default_log_file()),
            },
        }
    }
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            profile: Profile::Development,
            domain: DEFAULT_DOMAIN.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: None,
            rtc_url: None,
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus(),
            max_blocking_threads: default_max_blocking_threads(),
            global_width: num_cpus(),
            local_width: num_cpus(),
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
            alias_mid_serial: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_threads_has_floor() {
        assert!(default_max_blocking_threads() >= MIN_BLOCKING_THREADS);
        assert!(default_max_blocking_threads() >= num_cpus());
    }

    #[test]
    fn test_default_config_paths_live_in_config_dir() {
        let config = ConfigFile::default();
        let dir = super::super::file::config_directory();
        assert_eq!(config.store.file, dir.join("settings.ini"));
        assert_eq!(config.logging.file, dir.join("netlane.log"));
    }
}
