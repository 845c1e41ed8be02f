//! Canned responses delivered from a scheduler lane.

use std::sync::Arc;

use super::mock_sync::MockSyncBackend;
use super::traits::Backend;
use crate::model::{Route1Model, Route2Model};
use crate::response::{Completion, CompletionGuard};
use crate::route::RequestDescriptor;
use crate::scheduler::{Lane, Scheduler};

/// Lane the asynchronous mock answers on.
pub const MOCK_ASYNC_LANE: Lane = Lane::LocalMid;

/// How many times [`MockAsyncBackend`] answers a `/route2` request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchMode {
    /// Answer once synchronously, then once more from the lane.
    ///
    /// Long-standing behavior that existing callers observe as two
    /// completions per request.
    #[default]
    Compat,
    /// Answer once, from the lane.
    Single,
}

/// [`MockSyncBackend`] answering asynchronously on [`MOCK_ASYNC_LANE`].
pub struct MockAsyncBackend {
    inner: Arc<MockSyncBackend>,
    scheduler: Arc<Scheduler>,
    mode: DispatchMode,
}

impl MockAsyncBackend {
    pub fn new(inner: MockSyncBackend, scheduler: Arc<Scheduler>) -> Self {
        Self {
            inner: Arc::new(inner),
            scheduler,
            mode: DispatchMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// The wrapped synchronous mock.
    pub fn inner(&self) -> &MockSyncBackend {
        &self.inner
    }
}

impl Backend for MockAsyncBackend {
    fn name(&self) -> &str {
        "MockAsync"
    }

    fn handle_route1(&self, request: RequestDescriptor, completion: Completion<Route1Model>) {
        let inner = Arc::clone(&self.inner);
        let mut guard = CompletionGuard::new(completion);
        self.scheduler.run_async(MOCK_ASYNC_LANE, move || {
            if let Some(completion) = guard.take() {
                inner.handle_route1(request, completion);
            }
        });
    }

    fn handle_route2(&self, request: RequestDescriptor, completion: Completion<Route2Model>) {
        if self.mode == DispatchMode::Compat {
            self.inner.handle_route2(request.clone(), Arc::clone(&completion));
        }

        let inner = Arc::clone(&self.inner);
        let mut guard = CompletionGuard::new(completion);
        self.scheduler.run_async(MOCK_ASYNC_LANE, move || {
            if let Some(completion) = guard.take() {
                inner.handle_route2(request, completion);
            }
        });
    }
}
