//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let base_url = config.environment.base_url.as_deref().unwrap_or("");
    let rtc_url = config.environment.rtc_url.as_deref().unwrap_or("");
    let app_id = config.auth.app_id.as_deref().unwrap_or("");
    let default_token = config.auth.default_token.as_deref().unwrap_or("");
    let alias_mid_serial = if config.scheduler.alias_mid_serial {
        "true"
    } else {
        "false"
    };

    format!(
        r#"[environment]
; Server profile:
;   development - https://localhost:3000 for both bases
;   integration - https://api.int.<domain> and https://rtc.int.<domain><api_version>
;   production  - https://api.<domain><api_version> and https://rtc.<domain><api_version>
profile = {}
domain = {}
; Version path segment appended to versioned bases (e.g. /v1)
api_version = {}
; Explicit base URLs; leave empty to use the profile
base_url = {}
rtc_url = {}

[network]
; Backend when no APP_NETWORK_* environment flag is set:
;   default, native, library, mock_sync, mock_async
backend = {}
; Timeout in seconds for live transfers (default: 30)
timeout = {}

[auth]
; Sent as the App-ID header on authenticated routes
app_id = {}
; Used when no token has been persisted yet
default_token = {}

[scheduler]
; Async worker threads driving the lanes
worker_threads = {}
; Upper bound on threads running lane tasks
max_blocking_threads = {}
; Parallelism of each global and local concurrent queue
global_width = {}
local_width = {}
; Prefix of physical queue labels
label_prefix = {}
; Run LocalMidSerial on the utility serial queue, sharing it with LocalLoSerial
alias_mid_serial = {}

[settings]
; Persisted key/value store (bearer token)
file = {}

[logging]
file = {}
"#,
        config.environment.profile,
        config.environment.domain,
        config.environment.api_version,
        base_url,
        rtc_url,
        config.network.backend,
        config.network.timeout,
        app_id,
        default_token,
        config.scheduler.worker_threads,
        config.scheduler.max_blocking_threads,
        config.scheduler.global_width,
        config.scheduler.local_width,
        config.scheduler.label_prefix,
        alias_mid_serial,
        path_to_string(&config.store.file),
        path_to_string(&config.logging.file),
    )
}

/// Convert a path to a string, replacing home directory with ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendKind;
    use crate::route::Profile;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.environment.profile = Profile::Integration;
        config.environment.base_url = Some("https://api.local.test".to_string());
        config.network.backend = BackendKind::Library;
        config.auth.app_id = Some("com.example.app".to_string());
        config.scheduler.alias_mid_serial = true;
        config.scheduler.local_width = 7;
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.environment, config.environment);
        assert_eq!(loaded.network, config.network);
        assert_eq!(loaded.auth, config.auth);
        assert_eq!(loaded.scheduler, config.scheduler);
    }

    #[test]
    fn test_output_is_commented() {
        let output = to_config_string(&ConfigFile::default());
        assert!(output.contains("[scheduler]"));
        assert!(output.contains("; Backend when no APP_NETWORK_* environment flag is set"));
        assert!(output.contains("profile = development"));
        assert!(output.contains("backend = default"));
    }

    #[test]
    fn test_path_to_string_outside_home() {
        assert_eq!(path_to_string(Path::new("/var/log/x.log")), "/var/log/x.log");
    }
}
