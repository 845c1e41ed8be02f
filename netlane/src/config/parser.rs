//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::{Ini, Properties};
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [environment] section
    if let Some(section) = ini.section(Some("environment")) {
        if let Some(v) = section.get("profile") {
            config.environment.profile = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "environment".to_string(),
                key: "profile".to_string(),
                value: v.to_string(),
                reason: "must be one of: development, integration, production".to_string(),
            })?;
        }
        if let Some(v) = non_empty(section, "domain") {
            config.environment.domain = v;
        }
        if let Some(v) = section.get("api_version") {
            config.environment.api_version = v.trim().to_string();
        }
        config.environment.base_url = non_empty(section, "base_url");
        config.environment.rtc_url = non_empty(section, "rtc_url");
    }

    // [network] section
    if let Some(section) = ini.section(Some("network")) {
        if let Some(v) = section.get("backend") {
            config.network.backend = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "network".to_string(),
                key: "backend".to_string(),
                value: v.to_string(),
                reason: "must be one of: default, native, library, mock_sync, mock_async"
                    .to_string(),
            })?;
        }
        if let Some(v) = section.get("timeout") {
            config.network.timeout = parse_positive(v, "network", "timeout")? as u64;
        }
    }

    // [auth] section
    if let Some(section) = ini.section(Some("auth")) {
        config.auth.app_id = non_empty(section, "app_id");
        config.auth.default_token = non_empty(section, "default_token");
    }

    // [scheduler] section
    if let Some(section) = ini.section(Some("scheduler")) {
        if let Some(v) = section.get("worker_threads") {
            config.scheduler.worker_threads = parse_positive(v, "scheduler", "worker_threads")?;
        }
        if let Some(v) = section.get("max_blocking_threads") {
            config.scheduler.max_blocking_threads =
                parse_positive(v, "scheduler", "max_blocking_threads")?;
        }
        if let Some(v) = section.get("global_width") {
            config.scheduler.global_width = parse_positive(v, "scheduler", "global_width")?;
        }
        if let Some(v) = section.get("local_width") {
            config.scheduler.local_width = parse_positive(v, "scheduler", "local_width")?;
        }
        if let Some(v) = non_empty(section, "label_prefix") {
            config.scheduler.label_prefix = v;
        }
        if let Some(v) = section.get("alias_mid_serial") {
            config.scheduler.alias_mid_serial = parse_bool(v);
        }
    }

    // [settings] section
    if let Some(section) = ini.section(Some("settings")) {
        if let Some(v) = non_empty(section, "file") {
            config.store.file = expand_tilde(&v);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "file") {
            config.logging.file = expand_tilde(&v);
        }
    }

    Ok(config)
}

/// Trimmed value of `key`, or `None` when missing or blank.
fn non_empty(section: &Properties, key: &str) -> Option<String> {
    section
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_positive(value: &str, section: &str, key: &str) -> Result<usize, ConfigFileError> {
    match usize::from_str(value.trim()) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a positive integer".to_string(),
        }),
    }
}

/// Parse a boolean value (true/false, yes/no, 1/0, on/off).
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
