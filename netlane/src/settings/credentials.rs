//! Active bearer token with transactional updates.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::store::{SettingsError, SettingsStore};
use crate::log::Logger;
use crate::{log_debug, log_warn};

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";

/// A provisional token write.
///
/// Produced by [`Credentials::stage`]. The staged token is already the
/// persisted one; hand the stage back to [`Credentials::commit`] or
/// [`Credentials::rollback`] once the request it was staged for finishes.
#[must_use = "a staged token must be committed or rolled back"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStage {
    id: u64,
    previous: String,
    staged: String,
}

impl TokenStage {
    /// Token written by this stage.
    pub fn token(&self) -> &str {
        &self.staged
    }

    /// Token that was persisted before this stage.
    pub fn previous(&self) -> &str {
        &self.previous
    }
}

/// Outstanding stages on top of the last confirmed token.
///
/// The persisted token is always the newest outstanding stage, or `base`
/// when none is outstanding.
#[derive(Debug, Default)]
struct TokenLedger {
    base: String,
    pending: Vec<(u64, String)>,
    next_id: u64,
}

impl TokenLedger {
    fn active(&self) -> &str {
        self.pending
            .last()
            .map(|(_, token)| token.as_str())
            .unwrap_or(&self.base)
    }

    /// Drop a stage; `false` when it was already resolved.
    fn resolve(&mut self, id: u64) -> bool {
        match self.pending.iter().position(|(pending, _)| *pending == id) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Owner of the persisted bearer token.
///
/// All reads and writes of [`TOKEN_KEY`] go through one mutex, so staging,
/// committing and rolling back are atomic with respect to each other.
/// Overlapping requests each hold a stage; once every outstanding stage
/// has failed, the last confirmed token is persisted again.
pub struct Credentials {
    store: Arc<dyn SettingsStore>,
    default_token: Option<String>,
    ledger: Mutex<TokenLedger>,
    logger: Arc<dyn Logger>,
}

impl Credentials {
    /// # Arguments
    ///
    /// * `store` - Where the token is persisted
    /// * `default_token` - Used by [`resolved_token`](Self::resolved_token) when nothing is persisted
    /// * `logger` - Receives store failures
    pub fn new(
        store: Arc<dyn SettingsStore>,
        default_token: Option<String>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            store,
            default_token: default_token.filter(|t| !t.is_empty()),
            ledger: Mutex::new(TokenLedger::default()),
            logger,
        }
    }

    /// The persisted token, or an empty string if none is stored.
    ///
    /// Store failures are logged and read as empty.
    pub fn token(&self) -> String {
        let _ledger = self.ledger();
        self.read()
    }

    /// Token to send: the persisted one, else the configured default.
    pub fn resolved_token(&self) -> Option<String> {
        let persisted = self.token();
        if !persisted.is_empty() {
            return Some(persisted);
        }
        self.default_token.clone()
    }

    /// Persist `token` as the active token, remembering the previous one.
    pub fn stage(&self, token: &str) -> Result<TokenStage, SettingsError> {
        let mut ledger = self.ledger();
        let previous = self.read();
        if ledger.pending.is_empty() {
            ledger.base = previous.clone();
        }
        self.store.set(TOKEN_KEY, token)?;

        let id = ledger.next_id;
        ledger.next_id += 1;
        ledger.pending.push((id, token.to_string()));
        log_debug!(self.logger, "token staged ({} outstanding)", ledger.pending.len());

        Ok(TokenStage {
            id,
            previous,
            staged: token.to_string(),
        })
    }

    /// Confirm a stage.
    ///
    /// The staged token becomes the confirmed one. It is persisted unless a
    /// later stage is still outstanding, so the last successful request's
    /// token wins once everything settles.
    pub fn commit(&self, stage: &TokenStage) {
        let mut ledger = self.ledger();
        ledger.resolve(stage.id);
        ledger.base = stage.staged.clone();
        let active = ledger.active().to_string();
        self.persist(&active, "failed to persist token");
    }

    /// Undo a stage.
    ///
    /// The persisted token falls back to the newest stage still outstanding,
    /// or to the last confirmed token when none is. Rolling back a stage
    /// that was already resolved does nothing.
    pub fn rollback(&self, stage: &TokenStage) {
        let mut ledger = self.ledger();
        if !ledger.resolve(stage.id) {
            return;
        }
        let active = ledger.active().to_string();
        if self.persist(&active, "failed to restore token") {
            log_debug!(self.logger, "token stage rolled back");
        }
    }

    /// Write `token` unless it is already persisted; `false` on store failure.
    fn persist(&self, token: &str, context: &str) -> bool {
        if self.read() == token {
            return true;
        }
        match self.store.set(TOKEN_KEY, token) {
            Ok(()) => true,
            Err(e) => {
                log_warn!(self.logger, "{}: {}", context, e);
                false
            }
        }
    }

    fn read(&self) -> String {
        match self.store.get(TOKEN_KEY) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                log_warn!(self.logger, "failed to read token: {}", e);
                String::new()
            }
        }
    }

    fn ledger(&self) -> MutexGuard<'_, TokenLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NoOpLogger;
    use crate::settings::MemorySettingsStore;

    fn credentials(store: Arc<MemorySettingsStore>, default: Option<&str>) -> Credentials {
        Credentials::new(store, default.map(String::from), Arc::new(NoOpLogger))
    }

    #[test]
    fn test_empty_store_reads_empty() {
        let creds = credentials(Arc::new(MemorySettingsStore::new()), None);
        assert_eq!(creds.token(), "");
        assert_eq!(creds.resolved_token(), None);
    }

    #[test]
    fn test_default_token_fallback() {
        let store = Arc::new(MemorySettingsStore::new());
        let creds = credentials(store.clone(), Some("fallback"));
        assert_eq!(creds.resolved_token().as_deref(), Some("fallback"));

        store.set(TOKEN_KEY, "persisted").unwrap();
        assert_eq!(creds.resolved_token().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_empty_default_token_ignored() {
        let creds = credentials(Arc::new(MemorySettingsStore::new()), Some(""));
        assert_eq!(creds.resolved_token(), None);
    }

    #[test]
    fn test_stage_then_commit_keeps_token() {
        let store = Arc::new(MemorySettingsStore::with_value(TOKEN_KEY, "old"));
        let creds = credentials(store, None);

        let stage = creds.stage("new").unwrap();
        assert_eq!(stage.previous(), "old");
        assert_eq!(stage.token(), "new");
        assert_eq!(creds.token(), "new");

        creds.commit(&stage);
        assert_eq!(creds.token(), "new");
    }

    #[test]
    fn test_stage_then_rollback_restores_previous() {
        let store = Arc::new(MemorySettingsStore::with_value(TOKEN_KEY, "old"));
        let creds = credentials(store, None);

        let stage = creds.stage("new").unwrap();
        creds.rollback(&stage);
        assert_eq!(creds.token(), "old");
    }

    #[test]
    fn test_rollback_leaves_later_stage_alone() {
        let store = Arc::new(MemorySettingsStore::with_value(TOKEN_KEY, "old"));
        let creds = credentials(store, None);

        let first = creds.stage("first").unwrap();
        let second = creds.stage("second").unwrap();

        creds.rollback(&first);
        assert_eq!(creds.token(), "second");

        creds.commit(&second);
        assert_eq!(creds.token(), "second");
    }

    #[test]
    fn test_commit_after_rollback_persists_again() {
        let store = Arc::new(MemorySettingsStore::new());
        let creds = credentials(store, None);

        let stage = creds.stage("abc").unwrap();
        creds.rollback(&stage);
        assert_eq!(creds.token(), "");

        creds.commit(&stage);
        assert_eq!(creds.token(), "abc");
    }

    #[test]
    fn test_interleaved_failures_restore_confirmed_token() {
        let store = Arc::new(MemorySettingsStore::with_value(TOKEN_KEY, "old"));
        let creds = credentials(store, None);

        let a = creds.stage("a").unwrap();
        let b = creds.stage("b").unwrap();
        assert_eq!(b.previous(), "a");

        creds.rollback(&a);
        assert_eq!(creds.token(), "b");
        creds.rollback(&b);
        assert_eq!(creds.token(), "old");
    }

    #[test]
    fn test_later_failure_falls_back_to_earlier_success() {
        let store = Arc::new(MemorySettingsStore::with_value(TOKEN_KEY, "old"));
        let creds = credentials(store, None);

        let a = creds.stage("a").unwrap();
        let b = creds.stage("b").unwrap();

        creds.commit(&a);
        assert_eq!(creds.token(), "b");
        creds.rollback(&b);
        assert_eq!(creds.token(), "a");
    }

    #[test]
    fn test_failure_falls_back_to_outstanding_stage() {
        let store = Arc::new(MemorySettingsStore::with_value(TOKEN_KEY, "old"));
        let creds = credentials(store, None);

        let a = creds.stage("a").unwrap();
        let b = creds.stage("b").unwrap();

        creds.rollback(&b);
        assert_eq!(creds.token(), "a");
        creds.rollback(&a);
        assert_eq!(creds.token(), "old");
    }

    #[test]
    fn test_repeated_rollback_is_ignored() {
        let store = Arc::new(MemorySettingsStore::with_value(TOKEN_KEY, "old"));
        let creds = credentials(store, None);

        let a = creds.stage("a").unwrap();
        creds.rollback(&a);
        let b = creds.stage("b").unwrap();
        creds.rollback(&a);
        assert_eq!(creds.token(), "b");

        creds.commit(&b);
        creds.rollback(&b);
        assert_eq!(creds.token(), "b");
    }
}
