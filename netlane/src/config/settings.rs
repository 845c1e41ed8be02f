//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use crate::backend::BackendKind;
use crate::route::Profile;
use std::path::PathBuf;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Server environment profile and base URL overrides
    pub environment: EnvironmentSettings,
    /// Backend selection and transfer timeout
    pub network: NetworkSettings,
    /// Application identifier and fallback token
    pub auth: AuthSettings,
    /// Worker pool and lane sizing
    pub scheduler: SchedulerSettings,
    /// Persisted key/value store location (`[settings]` section)
    pub store: StoreSettings,
    /// Log output
    pub logging: LoggingSettings,
}

/// `[environment]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSettings {
    pub profile: Profile,
    /// Domain used by the integration and production profiles.
    pub domain: String,
    /// Version path segment appended to versioned bases, e.g. `/v1`.
    pub api_version: String,
    /// Replaces the computed API base when set.
    pub base_url: Option<String>,
    /// Replaces the computed real-time-channel base when set.
    pub rtc_url: Option<String>,
}

/// `[network]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSettings {
    /// Backend used when no environment flag selects one.
    pub backend: BackendKind,
    /// Timeout in seconds for live transfers.
    pub timeout: u64,
}

/// `[auth]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSettings {
    /// Sent as `App-ID` on routes that carry auth headers.
    pub app_id: Option<String>,
    /// Used when the persisted token is empty.
    pub default_token: Option<String>,
}

/// `[scheduler]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerSettings {
    /// Async worker threads driving lane dispatchers.
    pub worker_threads: usize,
    /// Upper bound on threads executing lane tasks.
    pub max_blocking_threads: usize,
    /// Parallelism of each global priority queue.
    pub global_width: usize,
    /// Parallelism of each local concurrent queue.
    pub local_width: usize,
    /// Prefix of physical queue labels.
    pub label_prefix: String,
    /// Map `LocalMidSerial` onto the utility serial queue instead of its own.
    pub alias_mid_serial: bool,
}

/// `[settings]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub file: PathBuf,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub file: PathBuf,
}
