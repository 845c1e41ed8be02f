//! Server environment profiles and base URLs.

use std::fmt;
use std::str::FromStr;

use crate::config::EnvironmentSettings;

const SCHEME: &str = "https://";
const DEV_HOST: &str = "localhost:3000";

/// Which server deployment requests go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    /// Local server, unversioned.
    #[default]
    Development,
    /// Staging servers under `int.<domain>`.
    Integration,
    /// Production servers.
    Production,
}

impl Profile {
    pub fn name(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Integration => "integration",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "integration" | "int" => Ok(Self::Integration),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown profile '{}'", other)),
        }
    }
}

/// Resolved base URLs for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    profile: Profile,
    base_url: String,
    rtc_url: String,
}

impl Environment {
    /// Compute both bases for `profile`.
    ///
    /// `version` is a path segment such as `/v1`, or empty.
    pub fn new(profile: Profile, domain: &str, version: &str) -> Self {
        let (base_url, rtc_url) = match profile {
            Profile::Development => {
                let base = format!("{}{}", SCHEME, DEV_HOST);
                (base.clone(), base)
            }
            Profile::Integration => (
                format!("{}api.int.{}", SCHEME, domain),
                format!("{}rtc.int.{}{}", SCHEME, domain, version),
            ),
            Profile::Production => (
                format!("{}api.{}{}", SCHEME, domain, version),
                format!("{}rtc.{}{}", SCHEME, domain, version),
            ),
        };

        Self {
            profile,
            base_url,
            rtc_url,
        }
    }

    /// Environment with explicit bases, e.g. a local test server.
    pub fn custom(base_url: impl Into<String>, rtc_url: impl Into<String>) -> Self {
        Self {
            profile: Profile::Development,
            base_url: base_url.into(),
            rtc_url: rtc_url.into(),
        }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Primary API base.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Real-time-channel base.
    pub fn rtc_url(&self) -> &str {
        &self.rtc_url
    }
}

impl From<&EnvironmentSettings> for Environment {
    fn from(settings: &EnvironmentSettings) -> Self {
        let mut env = Self::new(settings.profile, &settings.domain, &settings.api_version);
        if let Some(base) = &settings.base_url {
            env.base_url = base.clone();
        }
        if let Some(rtc) = &settings.rtc_url {
            env.rtc_url = rtc.clone();
        }
        env
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::from(&EnvironmentSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_uses_localhost_for_both() {
        let env = Environment::new(Profile::Development, "example.com", "/v1");
        assert_eq!(env.base_url(), "https://localhost:3000");
        assert_eq!(env.rtc_url(), "https://localhost:3000");
    }

    #[test]
    fn test_integration_versions_only_rtc() {
        let env = Environment::new(Profile::Integration, "example.com", "/v1");
        assert_eq!(env.base_url(), "https://api.int.example.com");
        assert_eq!(env.rtc_url(), "https://rtc.int.example.com/v1");
    }

    #[test]
    fn test_production_versions_both() {
        let env = Environment::new(Profile::Production, "example.com", "/v2");
        assert_eq!(env.base_url(), "https://api.example.com/v2");
        assert_eq!(env.rtc_url(), "https://rtc.example.com/v2");
    }

    #[test]
    fn test_production_without_version() {
        let env = Environment::new(Profile::Production, "example.com", "");
        assert_eq!(env.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_settings_overrides() {
        let settings = EnvironmentSettings {
            profile: Profile::Production,
            domain: "example.com".to_string(),
            api_version: "/v1".to_string(),
            base_url: Some("http://127.0.0.1:8080".to_string()),
            rtc_url: None,
        };
        let env = Environment::from(&settings);
        assert_eq!(env.base_url(), "http://127.0.0.1:8080");
        assert_eq!(env.rtc_url(), "https://rtc.example.com/v1");
        assert_eq!(env.profile(), Profile::Production);
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!("Production".parse::<Profile>(), Ok(Profile::Production));
        assert_eq!("int".parse::<Profile>(), Ok(Profile::Integration));
        assert!("staging".parse::<Profile>().is_err());
        assert_eq!(Profile::Integration.to_string(), "integration");
    }
}
