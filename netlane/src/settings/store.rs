//! Settings store trait and the in-memory implementation.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Errors from a settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings from {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to write settings to {path}: {reason}")]
    Write { path: String, reason: String },
}

/// Durable string key/value storage.
///
/// Values must survive a process restart for implementations used in
/// production. Reads of a missing key return `Ok(None)`.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Settings kept in a map; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let store = MemorySettingsStore::new();
        store.set("token", "abc").unwrap();
        store.set("token", "def").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("def"));
    }

    #[test]
    fn test_with_value() {
        let store = MemorySettingsStore::with_value("token", "seed");
        assert_eq!(store.get("token").unwrap().as_deref(), Some("seed"));
    }
}
