//! Model for the argument-less route.

use serde::Deserialize;
use std::fmt;

use super::{ArchiveMap, Model, Reserved};

/// Response of `GET /route1`.
///
/// Carries only the reserved fields; any other keys in the response are
/// ignored. Two `Route1Model`s always compare equal.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Route1Wire")]
pub struct Route1Model {
    reserved: Reserved,
}

#[derive(Deserialize)]
struct Route1Wire {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

impl From<Route1Wire> for Route1Model {
    fn from(wire: Route1Wire) -> Self {
        Self {
            reserved: Reserved::new(wire.error, wire.version),
        }
    }
}

impl Model for Route1Model {
    const NAME: &'static str = "Route1Model";

    fn error(&self) -> &str {
        self.reserved.error()
    }

    fn version(&self) -> &str {
        self.reserved.version()
    }

    fn upgraded(mut self) -> Self {
        self.reserved.upgrade();
        self
    }

    fn archive(&self) -> ArchiveMap {
        let mut map = ArchiveMap::new();
        self.reserved.archive_into(&mut map);
        map
    }

    fn restore(archive: &ArchiveMap) -> Self {
        Self {
            reserved: Reserved::restore(archive),
        }
        .upgraded()
    }
}

impl PartialEq for Route1Model {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Display for Route1Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::NAME)?;
        writeln!(f, "> error: {:?}", self.error())?;
        write!(f, "> version: {}", self.version())
    }
}
