//! Choosing which backend serves requests.

use std::fmt;
use std::str::FromStr;

/// Environment flags consulted before the configured kind, in order.
///
/// Presence counts; the value is ignored.
pub const ENV_FLAGS: [(&str, BackendKind); 4] = [
    ("APP_NETWORK_MOCK_SYNC", BackendKind::MockSync),
    ("APP_NETWORK_MOCK_ASYNC", BackendKind::MockAsync),
    ("APP_NETWORK_NATIVE", BackendKind::Native),
    ("APP_NETWORK_DEFAULT", BackendKind::Default),
];

/// Available backend kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BackendKind {
    MockSync,
    MockAsync,
    Native,
    Library,
    /// Whatever the build considers standard; currently [`BackendKind::Native`].
    #[default]
    Default,
}

impl BackendKind {
    pub const ALL: [BackendKind; 5] = [
        BackendKind::MockSync,
        BackendKind::MockAsync,
        BackendKind::Native,
        BackendKind::Library,
        BackendKind::Default,
    ];

    /// Name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::MockSync => "mock_sync",
            BackendKind::MockAsync => "mock_async",
            BackendKind::Native => "native",
            BackendKind::Library => "library",
            BackendKind::Default => "default",
        }
    }

    /// The concrete kind `Default` stands for.
    pub fn resolve(self) -> BackendKind {
        match self {
            BackendKind::Default => BackendKind::Native,
            other => other,
        }
    }

    /// Pick a kind from the process environment, falling back to `configured`.
    pub fn from_env(configured: BackendKind) -> BackendKind {
        Self::from_env_with(|name| std::env::var_os(name).is_some(), configured)
    }

    /// [`from_env`](Self::from_env) against an arbitrary flag lookup.
    pub fn from_env_with<F>(is_set: F, configured: BackendKind) -> BackendKind
    where
        F: Fn(&str) -> bool,
    {
        ENV_FLAGS
            .iter()
            .find(|(name, _)| is_set(name))
            .map(|(_, kind)| *kind)
            .unwrap_or(configured)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        BackendKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown backend '{}'", s))
    }
}
