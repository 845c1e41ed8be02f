//! Persisted key/value settings and the bearer token built on top of them.
//!
//! [`SettingsStore`] is the seam to whatever durable storage the embedding
//! application uses. Two implementations ship with the crate: an INI file
//! ([`IniSettingsStore`]) and a map in memory ([`MemorySettingsStore`]).
//!
//! [`Credentials`] owns the active token. Writes go through a stage that
//! is later committed or rolled back, so a failed request never leaves its
//! token behind and two concurrent requests cannot clobber each other.

mod credentials;
mod ini_store;
mod store;

pub use credentials::{Credentials, TokenStage, TOKEN_KEY};
pub use ini_store::IniSettingsStore;
pub use store::{MemorySettingsStore, SettingsError, SettingsStore};
