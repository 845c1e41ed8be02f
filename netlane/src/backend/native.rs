//! Blocking transfers on a scheduler lane.

use std::sync::Arc;

use super::http::{HttpClient, ReqwestClient};
use super::traits::Backend;
use super::transfer::TransferResult;
use crate::log::Logger;
use crate::model::{Model, Route1Model, Route2Model};
use crate::response::{self, Completion, CompletionGuard};
use crate::route::RequestDescriptor;
use crate::scheduler::{Lane, Scheduler};

/// Lane native transfers run on unless configured otherwise.
pub const DEFAULT_NATIVE_LANE: Lane = Lane::SysMidHi;

/// Backend running a blocking [`HttpClient`] on a scheduler lane.
///
/// The transfer, the response processing and the completion all run on
/// that lane.
pub struct NativeBackend<C: HttpClient = ReqwestClient> {
    client: Arc<C>,
    scheduler: Arc<Scheduler>,
    lane: Lane,
    logger: Arc<dyn Logger>,
}

impl<C: HttpClient + 'static> NativeBackend<C> {
    pub fn new(client: C, scheduler: Arc<Scheduler>, logger: Arc<dyn Logger>) -> Self {
        Self {
            client: Arc::new(client),
            scheduler,
            lane: DEFAULT_NATIVE_LANE,
            logger,
        }
    }

    /// Run transfers on `lane` instead.
    pub fn with_lane(mut self, lane: Lane) -> Self {
        self.lane = lane;
        self
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    fn transfer<M: Model>(&self, request: RequestDescriptor, completion: Completion<M>) {
        let guard = CompletionGuard::new(completion);
        let client = Arc::clone(&self.client);
        let logger = Arc::clone(&self.logger);

        self.scheduler.run_async(self.lane, move || {
            let result = TransferResult::from_outcome(client.execute(&request));
            response::deliver(result, logger.as_ref(), guard);
        });
    }
}

impl<C: HttpClient + 'static> Backend for NativeBackend<C> {
    fn name(&self) -> &str {
        "Native"
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
    use crate::backend::http::tests::MockHttpClient;
    use crate::backend::TransportError;
    use crate::log::NoOpLogger;
    use crate::route::tests::sample_request;
    use crate::scheduler::SchedulerConfig;
    use std::sync::mpsc;
    use std::time::Duration;

    fn scheduler() -> Arc<Scheduler> {
        Arc::new(Scheduler::new(SchedulerConfig::default(), Arc::new(NoOpLogger)).unwrap())
    }

    #[test]
    fn test_route2_decoded_on_lane() {
        let body = br#"{"isWidget":true,"widget-count":2,"widgetRatio":1.5,"widgets":["x","y"]}"#;
        let backend = NativeBackend::new(
            MockHttpClient::returning(Ok(body.to_vec())),
            scheduler(),
            Arc::new(NoOpLogger),
        );

        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        backend.handle_route2(
            sample_request(),
            Arc::new(move |model| {
                let name = std::thread::current().name().map(String::from);
                tx.lock().unwrap().send((model, name)).unwrap();
            }),
        );

        let (model, thread) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(model.unwrap().max_widgets(), 2);
        assert_eq!(thread.as_deref(), Some("netlane-worker"));
    }

    #[test]
    fn test_transport_error_delivers_none() {
        let backend = NativeBackend::new(
            MockHttpClient::returning(Err(TransportError::Request("refused".to_string()))),
            scheduler(),
            Arc::new(NoOpLogger),
        );

        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        backend.handle_route1(
            sample_request(),
            Arc::new(move |model| tx.lock().unwrap().send(model.is_some()).unwrap()),
        );

        assert!(!rx.recv_timeout(Duration::from_secs(5)).unwrap());
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_custom_lane() {
        let backend = NativeBackend::new(
            MockHttpClient::returning(Ok(b"{}".to_vec())),
            scheduler(),
            Arc::new(NoOpLogger),
        )
        .with_lane(Lane::LocalHi);
        assert_eq!(backend.lane(), Lane::LocalHi);
        assert_eq!(backend.name(), "Native");
    }
}
