//! Async transfers on the scheduler's runtime.

use std::sync::Arc;

use super::http::{AsyncHttpClient, AsyncReqwestClient};
use super::traits::Backend;
use super::transfer::TransferResult;
use crate::log::Logger;
use crate::model::{Model, Route1Model, Route2Model};
use crate::response::{self, Completion, CompletionGuard};
use crate::route::RequestDescriptor;
use crate::scheduler::Scheduler;

/// Backend driving a non-blocking [`AsyncHttpClient`].
///
/// Each transfer is a task on the scheduler's tokio runtime; the
/// completion runs on a runtime worker thread.
pub struct LibraryBackend<C: AsyncHttpClient = AsyncReqwestClient> {
    client: Arc<C>,
    scheduler: Arc<Scheduler>,
    logger: Arc<dyn Logger>,
}

impl<C: AsyncHttpClient + 'static> LibraryBackend<C> {
    pub fn new(client: C, scheduler: Arc<Scheduler>, logger: Arc<dyn Logger>) -> Self {
        Self {
            client: Arc::new(client),
            scheduler,
            logger,
        }
    }

    fn transfer<M: Model>(&self, request: RequestDescriptor, completion: Completion<M>) {
        let guard = CompletionGuard::new(completion);
        let client = Arc::clone(&self.client);
        let logger = Arc::clone(&self.logger);

        self.scheduler.handle().spawn(async move {
            let outcome = client.execute(&request).await;
            response::deliver(TransferResult::from_outcome(outcome), logger.as_ref(), guard);
        });
    }
}

impl<C: AsyncHttpClient + 'static> Backend for LibraryBackend<C> {
    fn name(&self) -> &str {
        "Library"
    }

    fn handle_route1(&self, request: RequestDescriptor, completion: Completion<Route1Model>) {
        self.transfer(request, completion);
    }

    fn handle_route2(&self, request: RequestDescriptor, completion: Completion<Route2Model>) {
        self.transfer(request, completion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::http::tests::MockAsyncHttpClient;
    use crate::backend::TransportError;
    use crate::log::NoOpLogger;
    use crate::route::tests::sample_request;
    use crate::scheduler::SchedulerConfig;
    use std::sync::{mpsc, Mutex};
    use std::time::Duration;

    fn backend(response: Result<Vec<u8>, TransportError>) -> LibraryBackend<MockAsyncHttpClient> {
        let scheduler =
            Arc::new(Scheduler::new(SchedulerConfig::default(), Arc::new(NoOpLogger)).unwrap());
        LibraryBackend::new(MockAsyncHttpClient { response }, scheduler, Arc::new(NoOpLogger))
    }

    #[test]
    fn test_route1_model_delivered() {
        let backend = backend(Ok(br#"{"version":"1"}"#.to_vec()));
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);

        backend.handle_route1(
            sample_request(),
            Arc::new(move |model: Option<Route1Model>| {
                tx.lock().unwrap().send(model.map(|m| m.version().to_string())).unwrap()
            }),
        );

        let version = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(version.as_deref(), Some("1.00"));
    }

    #[test]
    fn test_server_error_body_becomes_model_error() {
        let backend = backend(Ok(br#"{"error":{"message":"expired"}}"#.to_vec()));
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);

        backend.handle_route2(
            sample_request(),
            Arc::new(move |model: Option<Route2Model>| {
                tx.lock().unwrap().send(model.map(|m| m.error().to_string())).unwrap()
            }),
        );

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap().as_deref(),
            Some("expired")
        );
    }

    #[test]
    fn test_transport_error_delivers_none_once() {
        let backend = backend(Err(TransportError::Status { status: 404 }));
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);

        backend.handle_route2(
            sample_request(),
            Arc::new(move |model: Option<Route2Model>| tx.lock().unwrap().send(model.is_none()).unwrap()),
        );

        assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }
}
