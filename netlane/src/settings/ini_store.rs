//! Settings persisted in an INI file.

use ini::Ini;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::store::{SettingsError, SettingsStore};

const SECTION: &str = "settings";

/// Settings stored under `[settings]` in an INI file.
///
/// Each `set` rewrites the whole file. The file and its parent directory
/// are created on first write; a missing file reads as empty.
#[derive(Debug)]
pub struct IniSettingsStore {
    path: PathBuf,
    // Serializes read-modify-write cycles from this process.
    write_lock: Mutex<()>,
}

impl IniSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Ini, SettingsError> {
        if !self.path.exists() {
            return Ok(Ini::new());
        }
        Ini::load_from_file(&self.path).map_err(|e| SettingsError::Read {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn write_error(&self, reason: impl ToString) -> SettingsError {
        SettingsError::Write {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl SettingsStore for IniSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let ini = self.load()?;
        Ok(ini.get_from(Some(SECTION), key).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut ini = self.load()?;
        ini.with_section(Some(SECTION)).set(key, value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        ini.write_to_file(&self.path)
            .map_err(|e| self.write_error(e))
    }
}
