//! Description of the machine sending requests.
//!
//! `/route2` reports the device name, platform and platform version with
//! every call. Values are collected once, from `uname` and
//! `/etc/os-release`, and fall back to `"unknown"`.
//!
//! # Example
//!
//! ```
//! use netlane::device::DeviceInfo;
//!
//! let device = DeviceInfo::collect();
//! assert!(!device.platform.is_empty());
//! ```

use std::fmt;
use std::fs;
use std::process::Command;

const UNKNOWN: &str = "unknown";

/// Identity of the local device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Host name
    pub name: String,
    /// Operating system family, e.g. `linux`
    pub platform: String,
    /// Distribution or kernel version
    pub platform_version: String,
}

impl DeviceInfo {
    pub fn new(
        name: impl Into<String>,
        platform: impl Into<String>,
        platform_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            platform_version: platform_version.into(),
        }
    }

    /// Collect device information from the running system.
    pub fn collect() -> Self {
        let name = command_output("uname", &["-n"])
            .or_else(|| std::env::var("HOSTNAME").ok())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let platform_version = fs::read_to_string("/etc/os-release")
            .ok()
            .and_then(|content| os_release_version(&content))
            .or_else(|| command_output("uname", &["-r"]))
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            name,
            platform: std::env::consts::OS.to_string(),
            platform_version,
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.platform, self.platform_version)
    }
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// `VERSION_ID` from os-release content.
fn os_release_version(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("VERSION_ID="))
        .map(|value| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_release_version() {
        let content = "NAME=\"Fedora Linux\"\nVERSION_ID=40\nPRETTY_NAME=\"Fedora Linux 40\"\n";
        assert_eq!(os_release_version(content).as_deref(), Some("40"));

        let quoted = "ID=ubuntu\nVERSION_ID=\"24.04\"\n";
        assert_eq!(os_release_version(quoted).as_deref(), Some("24.04"));

        assert_eq!(os_release_version("ID=arch\n"), None);
        assert_eq!(os_release_version("VERSION_ID=\"\"\n"), None);
    }

    #[test]
    fn test_collect_fills_every_field() {
        let device = DeviceInfo::collect();
        assert!(!device.name.is_empty());
        assert_eq!(device.platform, std::env::consts::OS);
        assert!(!device.platform_version.is_empty());
    }

    #[test]
    fn test_display() {
        let device = DeviceInfo::new("bench", "linux", "6.8");
        assert_eq!(device.to_string(), "bench (linux 6.8)");
    }
}
