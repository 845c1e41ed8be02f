//! Backend factory for centralized backend creation.

use std::sync::Arc;

use super::http::{AsyncReqwestClient, ReqwestClient};
use super::library::LibraryBackend;
use super::mock_async::{DispatchMode, MockAsyncBackend};
use super::mock_sync::{MockFixtures, MockSyncBackend};
use super::native::NativeBackend;
use super::selection::BackendKind;
use super::traits::Backend;
use super::BackendError;
use crate::config::DEFAULT_NETWORK_TIMEOUT_SECS;
use crate::log::Logger;
use crate::scheduler::{Lane, Scheduler};

/// Creates [`Backend`]s that share one scheduler and logger.
///
/// # Example
///
/// ```
/// use netlane::backend::{BackendFactory, BackendKind};
/// use netlane::log::NoOpLogger;
/// use netlane::scheduler::{Scheduler, SchedulerConfig};
/// use std::sync::Arc;
///
/// let logger = Arc::new(NoOpLogger);
/// let scheduler = Arc::new(Scheduler::new(SchedulerConfig::default(), logger.clone()).unwrap());
/// let factory = BackendFactory::new(scheduler, logger);
/// let backend = factory.create(BackendKind::MockSync).unwrap();
/// assert_eq!(backend.name(), "MockSync");
/// ```
#[derive(Clone)]
pub struct BackendFactory {
    scheduler: Arc<Scheduler>,
    logger: Arc<dyn Logger>,
    timeout_secs: u64,
    native_lane: Lane,
    fixtures: MockFixtures,
    dispatch_mode: DispatchMode,
}

impl BackendFactory {
    pub fn new(scheduler: Arc<Scheduler>, logger: Arc<dyn Logger>) -> Self {
        Self {
            scheduler,
            logger,
            timeout_secs: DEFAULT_NETWORK_TIMEOUT_SECS,
            native_lane: super::native::DEFAULT_NATIVE_LANE,
            fixtures: MockFixtures::default(),
            dispatch_mode: DispatchMode::default(),
        }
    }

    /// Request timeout for the live backends.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_native_lane(mut self, lane: Lane) -> Self {
        self.native_lane = lane;
        self
    }

    pub fn with_fixtures(mut self, fixtures: MockFixtures) -> Self {
        self.fixtures = fixtures;
        self
    }

    pub fn with_dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.dispatch_mode = mode;
        self
    }

    /// Build the backend for `kind`, resolving [`BackendKind::Default`].
    pub fn create(&self, kind: BackendKind) -> Result<Arc<dyn Backend>, BackendError> {
        let backend: Arc<dyn Backend> = match kind.resolve() {
            BackendKind::MockSync => Arc::new(self.mock_sync()),
            BackendKind::MockAsync => Arc::new(
                MockAsyncBackend::new(self.mock_sync(), Arc::clone(&self.scheduler))
                    .with_mode(self.dispatch_mode),
            ),
            BackendKind::Library => Arc::new(LibraryBackend::new(
                AsyncReqwestClient::with_timeout(self.timeout_secs)?,
                Arc::clone(&self.scheduler),
                Arc::clone(&self.logger),
            )),
            BackendKind::Native | BackendKind::Default => Arc::new(
                NativeBackend::new(
                    ReqwestClient::with_timeout(self.timeout_secs)?,
                    Arc::clone(&self.scheduler),
                    Arc::clone(&self.logger),
                )
                .with_lane(self.native_lane),
            ),
        };
        Ok(backend)
    }

    fn mock_sync(&self) -> MockSyncBackend {
        MockSyncBackend::with_fixtures(self.fixtures.clone(), Arc::clone(&self.logger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NoOpLogger;
    use crate::scheduler::SchedulerConfig;

    fn factory() -> BackendFactory {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
        let scheduler = Arc::new(Scheduler::new(SchedulerConfig::default(), Arc::clone(&logger)).unwrap());
        BackendFactory::new(scheduler, logger)
    }

    #[test]
    fn test_create_each_kind() {
        let factory = factory().with_timeout(5);
        let names: Vec<String> = BackendKind::ALL
            .into_iter()
            .map(|kind| factory.create(kind).unwrap().name().to_string())
            .collect();
        assert_eq!(names, ["MockSync", "MockAsync", "Native", "Library", "Native"]);
    }
}
