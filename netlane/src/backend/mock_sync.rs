//! Canned responses, processed on the calling thread.

use std::sync::{Arc, Mutex, PoisonError};

use super::traits::Backend;
use super::transfer::{TransferResult, TransportError};
use crate::log::Logger;
use crate::model::{Model, Route1Model, Route2Model};
use crate::response::{self, Completion};
use crate::route::RequestDescriptor;

/// Default `/route1` payload. Only the reserved fields matter to the model.
pub const ROUTE1_FIXTURE: &str = r#"{"a":"123","b":123,"c":"mama"}"#;

/// Default `/route2` payload.
pub const ROUTE2_FIXTURE: &str =
    r#"{"isWidget":true,"widget-count":3,"widgetRatio":0.5,"widgets":["alpha","beta","gamma"]}"#;

/// What each route answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFixtures {
    pub route1: Result<Vec<u8>, TransportError>,
    pub route2: Result<Vec<u8>, TransportError>,
}

impl Default for MockFixtures {
    fn default() -> Self {
        Self {
            route1: Ok(ROUTE1_FIXTURE.as_bytes().to_vec()),
            route2: Ok(ROUTE2_FIXTURE.as_bytes().to_vec()),
        }
    }
}

/// Backend answering from [`MockFixtures`] without touching the network.
///
/// The completion runs before `handle_*` returns. Every request is kept
/// so callers can inspect what would have been sent.
pub struct MockSyncBackend {
    fixtures: MockFixtures,
    requests: Mutex<Vec<RequestDescriptor>>,
    logger: Arc<dyn Logger>,
}

impl MockSyncBackend {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_fixtures(MockFixtures::default(), logger)
    }

    pub fn with_fixtures(fixtures: MockFixtures, logger: Arc<dyn Logger>) -> Self {
        Self {
            fixtures,
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    pub fn fixtures(&self) -> &MockFixtures {
        &self.fixtures
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn respond<M: Model>(
        &self,
        request: RequestDescriptor,
        fixture: &Result<Vec<u8>, TransportError>,
        completion: Completion<M>,
    ) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        // Fixtures are handed over as raw bytes, without pre-parsed JSON.
        let result = match fixture {
            Ok(body) => TransferResult::from_bytes(body.clone()),
            Err(e) => TransferResult::from_error(e.clone()),
        };
        response::handle_results(result, self.logger.as_ref(), completion);
    }
}

impl Backend for MockSyncBackend {
    fn name(&self) -> &str {
        "MockSync"
    }

    fn handle_route1(&self, request: RequestDescriptor, completion: Completion<Route1Model>) {
        self.respond(request, &self.fixtures.route1, completion);
    }

    fn handle_route2(&self, request: RequestDescriptor, completion: Completion<Route2Model>) {
        self.respond(request, &self.fixtures.route2, completion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NoOpLogger;
    use crate::model::CURRENT_VERSION;
    use crate::route::tests::sample_request;

    fn capture<M: Send + 'static>() -> (Completion<M>, Arc<Mutex<Vec<Option<M>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (Arc::new(move |m| sink.lock().unwrap().push(m)), calls)
    }

    #[test]
    fn test_default_fixtures_decode_before_return() {
        let backend = MockSyncBackend::new(Arc::new(NoOpLogger));

        let (completion, route1) = capture::<Route1Model>();
        backend.handle_route1(sample_request(), completion);
        let (completion, route2) = capture::<Route2Model>();
        backend.handle_route2(sample_request(), completion);

        let route1 = route1.lock().unwrap();
        assert_eq!(route1.len(), 1);
        assert_eq!(route1[0].as_ref().unwrap().version(), CURRENT_VERSION);

        let route2 = route2.lock().unwrap();
        assert_eq!(route2.len(), 1);
        assert_eq!(route2[0].as_ref().unwrap().widgets(), ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_fixture_error() {
        let fixtures = MockFixtures {
            route2: Err(TransportError::Request("offline".to_string())),
            ..MockFixtures::default()
        };
        let backend = MockSyncBackend::with_fixtures(fixtures, Arc::new(NoOpLogger));

        let (completion, calls) = capture::<Route2Model>();
        backend.handle_route2(sample_request(), completion);
        assert_eq!(calls.lock().unwrap().len(), 1);
        assert!(calls.lock().unwrap()[0].is_none());
    }

    #[test]
    fn test_records_requests() {
        let backend = MockSyncBackend::new(Arc::new(NoOpLogger));
        backend.handle_route1(sample_request(), Arc::new(|_| {}));
        assert_eq!(backend.requests(), vec![sample_request()]);
    }
}
