//! Versioned response models.
//!
//! Every model carries two reserved fields next to its domain fields:
//!
//! - `error`: message reported by the server, `""` when none
//! - `version`: schema version, stamped with [`CURRENT_VERSION`] when absent
//!
//! Models are only built by decoding wire JSON or by restoring an archive,
//! and both paths end in version resolution, so a model is always fully
//! populated. Equality compares domain fields only.

pub mod archive;
mod route1;
mod route2;
pub mod version;

pub use archive::{ArchiveError, ArchiveMap};
pub use route1::Route1Model;
pub use route2::Route2Model;
pub use version::CURRENT_VERSION;

use serde::de::DeserializeOwned;

/// A response model decodable from wire JSON.
pub trait Model: DeserializeOwned + Send + 'static {
    /// Type name used in logs.
    const NAME: &'static str;

    /// Server-reported error, `""` when none.
    fn error(&self) -> &str;

    /// Resolved schema version.
    fn version(&self) -> &str;

    /// Apply version resolution and any migrations.
    fn upgraded(self) -> Self;

    /// Flat archive of every field.
    fn archive(&self) -> ArchiveMap;

    /// Rebuild from an archive, defaulting missing fields.
    fn restore(archive: &ArchiveMap) -> Self;

    /// Whether the server reported an error.
    fn has_error(&self) -> bool {
        !self.error().is_empty()
    }
}

/// The reserved fields shared by every model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Reserved {
    error: String,
    version: String,
}

impl Reserved {
    /// Decoded values, with the version already resolved.
    ///
    /// Every serde decode goes through here, so even a model read with
    /// plain `serde_json::from_str` carries a version.
    pub(crate) fn new(error: Option<String>, raw_version: Option<String>) -> Self {
        Self {
            error: error.unwrap_or_default(),
            version: version::resolve(raw_version.as_deref()),
        }
    }

    pub(crate) fn error(&self) -> &str {
        &self.error
    }

    pub(crate) fn version(&self) -> &str {
        &self.version
    }

    pub(crate) fn upgrade(&mut self) {
        self.version = version::resolve(Some(&self.version));
    }

    pub(crate) fn archive_into(&self, map: &mut ArchiveMap) {
        map.insert(archive::KEY_ERROR.to_string(), self.error.clone().into());
        map.insert(archive::KEY_VERSION.to_string(), self.version.clone().into());
    }

    pub(crate) fn restore(map: &ArchiveMap) -> Self {
        Self {
            error: archive::get_string(map, archive::KEY_ERROR),
            version: archive::get_string(map, archive::KEY_VERSION),
        }
    }
}
