//! User configuration.
//!
//! Everything tunable about the pipeline lives in one INI file,
//! `~/.netlane/config.ini`, with a section per concern:
//!
//! | Section | Controls |
//! |---|---|
//! | `[environment]` | server profile and base URL overrides |
//! | `[network]` | backend selection, transfer timeout |
//! | `[auth]` | `App-ID` header, fallback token |
//! | `[scheduler]` | worker pool size and lane widths |
//! | `[settings]` | persisted key/value store location |
//! | `[logging]` | log file |
//!
//! Missing files and missing keys fall back to defaults; malformed values
//! are reported as [`ConfigFileError::InvalidValue`].
//!
//! # Example
//!
//! ```
//! use netlane::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.network.timeout, 30);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    AuthSettings, ConfigFile, EnvironmentSettings, LoggingSettings, NetworkSettings,
    SchedulerSettings, StoreSettings,
};
