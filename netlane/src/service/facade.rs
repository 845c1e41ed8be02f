//! Network service facade implementation.

use std::sync::{Arc, PoisonError, RwLock};

use crate::backend::Backend;
use crate::device::DeviceInfo;
use crate::log::Logger;
use crate::model::{Route1Model, Route2Model};
use crate::response::Completion;
use crate::route::{keys, Attributes, RequestBuilder, Route};
use crate::settings::Credentials;
use crate::{log_info, log_warn};

/// Entry point for issuing route requests.
///
/// Owns the active backend, the request builder and the token store. The
/// backend can be replaced at any time; each request keeps the backend it
/// started with.
///
/// # Example
///
/// ```
/// use netlane::backend::MockSyncBackend;
/// use netlane::device::DeviceInfo;
/// use netlane::log::NoOpLogger;
/// use netlane::route::{Environment, RequestBuilder};
/// use netlane::service::NetworkService;
/// use netlane::settings::{Credentials, MemorySettingsStore};
/// use std::sync::Arc;
///
/// let logger = Arc::new(NoOpLogger);
/// let credentials = Arc::new(Credentials::new(
///     Arc::new(MemorySettingsStore::new()),
///     None,
///     logger.clone(),
/// ));
/// let builder = RequestBuilder::new(Environment::default(), None, credentials, logger.clone());
/// let service = NetworkService::new(builder, DeviceInfo::collect(), logger.clone());
///
/// service.set_backend(Arc::new(MockSyncBackend::new(logger)));
/// service.get_route1(Arc::new(|model| assert!(model.is_some())));
/// ```
pub struct NetworkService {
    backend: RwLock<Option<Arc<dyn Backend>>>,
    builder: RequestBuilder,
    device: DeviceInfo,
    logger: Arc<dyn Logger>,
}

impl NetworkService {
    /// Create a service with no backend configured.
    ///
    /// Requests complete with `None` until [`set_backend`](Self::set_backend)
    /// is called.
    pub fn new(builder: RequestBuilder, device: DeviceInfo, logger: Arc<dyn Logger>) -> Self {
        Self {
            backend: RwLock::new(None),
            builder,
            device,
            logger,
        }
    }

    /// Install `backend` for subsequent requests.
    pub fn set_backend(&self, backend: Arc<dyn Backend>) {
        let environment = self.builder.environment();
        log_info!(
            self.logger,
            "{} configured\n   api: {}\n   rtc: {}",
            backend.name(),
            environment.base_url(),
            environment.rtc_url()
        );
        *self.backend.write().unwrap_or_else(PoisonError::into_inner) = Some(backend);
    }

    /// Remove the backend; subsequent requests complete with `None`.
    pub fn clear_backend(&self) {
        *self.backend.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The backend new requests would use.
    pub fn backend(&self) -> Option<Arc<dyn Backend>> {
        self.backend
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn credentials(&self) -> &Arc<Credentials> {
        self.builder.credentials()
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    /// Fetch `/route1`.
    ///
    /// Completes with `None` right away when no backend is configured or
    /// the request cannot be built.
    pub fn get_route1(&self, completion: Completion<Route1Model>) {
        let Some(backend) = self.backend() else {
            completion(None);
            return;
        };

        match self.builder.build(&Route::Route1) {
            Ok(request) => backend.handle_route1(request, completion),
            Err(e) => {
                log_warn!(self.logger, "route1 request not built: {}", e);
                completion(None);
            }
        }
    }

    /// Post device details to `/route2`, authorizing with `token`.
    ///
    /// `token` becomes the persisted token as the request is built. It
    /// stays persisted if a model comes back and is rolled back otherwise.
    /// Completes with `None` right away, touching nothing, when no backend
    /// is configured or `token` is empty.
    ///
    /// The completion receives every answer the backend gives.
    pub fn post_route2(&self, token: &str, completion: Completion<Route2Model>) {
        let Some(backend) = self.backend() else {
            completion(None);
            return;
        };
        if token.is_empty() {
            completion(None);
            return;
        }

        let parameters = self.route2_parameters();
        log_info!(self.logger, "{}", serde_json::Value::Object(parameters.clone()));

        let staged = match self.builder.build_with_token(&Route::Route2(parameters), token) {
            Ok(staged) => staged,
            Err(e) => {
                log_warn!(self.logger, "route2 request not built: {}", e);
                completion(None);
                return;
            }
        };

        let credentials = Arc::clone(self.builder.credentials());
        let stage = staged.stage;
        backend.handle_route2(
            staged.request,
            Arc::new(move |model: Option<Route2Model>| {
                if model.is_some() {
                    credentials.commit(&stage);
                } else {
                    credentials.rollback(&stage);
                }
                completion(model);
            }),
        );
    }

    /// Request body for `/route2`; `token` carries the persisted token.
    fn route2_parameters(&self) -> Attributes {
        let mut parameters = Attributes::new();
        parameters.insert(keys::DEVICE_NAME.to_string(), self.device.name.clone().into());
        parameters.insert(keys::PLATFORM.to_string(), self.device.platform.clone().into());
        parameters.insert(
            keys::PLATFORM_VERSION.to_string(),
            self.device.platform_version.clone().into(),
        );
        parameters.insert(keys::TOKEN.to_string(), self.credentials().token().into());
        parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockFixtures, MockSyncBackend, TransportError};
    use crate::log::{NoOpLogger, RecordingLogger};
    use crate::route::Environment;
    use crate::settings::{MemorySettingsStore, TOKEN_KEY};
    use std::sync::Mutex;

    struct Fixture {
        service: NetworkService,
        store: Arc<MemorySettingsStore>,
    }

    fn fixture(initial_token: Option<&str>, logger: Arc<dyn Logger>) -> Fixture {
        let store = Arc::new(match initial_token {
            Some(token) => MemorySettingsStore::with_value(TOKEN_KEY, token),
            None => MemorySettingsStore::new(),
        });
        let credentials = Arc::new(Credentials::new(store.clone(), None, Arc::clone(&logger)));
        let builder = RequestBuilder::new(
            Environment::default(),
            Some("com.netlane.tests".to_string()),
            credentials,
            Arc::clone(&logger),
        );
        let device = DeviceInfo::new("bench", "linux", "6.8");
        Fixture {
            service: NetworkService::new(builder, device, logger),
            store,
        }
    }

    fn capture<M: Send + 'static>() -> (Completion<M>, Arc<Mutex<Vec<Option<M>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (Arc::new(move |m| sink.lock().unwrap().push(m)), calls)
    }

    fn stored_token(store: &MemorySettingsStore) -> Option<String> {
        crate::settings::SettingsStore::get(store, TOKEN_KEY).unwrap()
    }

    #[test]
    fn test_no_backend_completes_with_none() {
        let f = fixture(Some("old"), Arc::new(NoOpLogger));

        let (completion, route1) = capture::<Route1Model>();
        f.service.get_route1(completion);
        let (completion, route2) = capture::<Route2Model>();
        f.service.post_route2("abc", completion);

        assert_eq!(route1.lock().unwrap().len(), 1);
        assert!(route1.lock().unwrap()[0].is_none());
        assert_eq!(route2.lock().unwrap().len(), 1);
        assert!(route2.lock().unwrap()[0].is_none());
        assert_eq!(stored_token(&f.store).as_deref(), Some("old"));
    }

    #[test]
    fn test_post_route2_success_persists_token() {
        let f = fixture(Some("old"), Arc::new(NoOpLogger));
        let backend = Arc::new(MockSyncBackend::new(Arc::new(NoOpLogger)));
        f.service.set_backend(backend.clone());

        let (completion, calls) = capture::<Route2Model>();
        f.service.post_route2("abc", completion);

        assert_eq!(calls.lock().unwrap().len(), 1);
        assert!(calls.lock().unwrap()[0].is_some());
        assert_eq!(stored_token(&f.store).as_deref(), Some("abc"));

        let sent = &backend.requests()[0];
        assert_eq!(sent.header("Authorization"), Some("abc"));
        let body: serde_json::Value = serde_json::from_slice(sent.body().unwrap()).unwrap();
        assert_eq!(body["token"], "old");
        assert_eq!(body["deviceName"], "bench");
        assert_eq!(body["platform"], "linux");
        assert_eq!(body["platformVersion"], "6.8");
    }

    #[test]
    fn test_post_route2_failure_restores_token() {
        let f = fixture(Some("old"), Arc::new(NoOpLogger));
        let fixtures = MockFixtures {
            route2: Err(TransportError::Request("offline".to_string())),
            ..MockFixtures::default()
        };
        f.service
            .set_backend(Arc::new(MockSyncBackend::with_fixtures(fixtures, Arc::new(NoOpLogger))));

        let (completion, calls) = capture::<Route2Model>();
        f.service.post_route2("abc", completion);

        assert!(calls.lock().unwrap()[0].is_none());
        assert_eq!(stored_token(&f.store).as_deref(), Some("old"));
    }

    #[test]
    fn test_empty_token_touches_nothing() {
        let f = fixture(Some("old"), Arc::new(NoOpLogger));
        let backend = Arc::new(MockSyncBackend::new(Arc::new(NoOpLogger)));
        f.service.set_backend(backend.clone());

        let (completion, calls) = capture::<Route2Model>();
        f.service.post_route2("", completion);

        assert_eq!(calls.lock().unwrap().len(), 1);
        assert!(calls.lock().unwrap()[0].is_none());
        assert!(backend.requests().is_empty());
        assert_eq!(stored_token(&f.store).as_deref(), Some("old"));
    }

    #[test]
    fn test_set_backend_logs_bases() {
        let logger = Arc::new(RecordingLogger::new());
        let f = fixture(None, logger.clone());
        f.service
            .set_backend(Arc::new(MockSyncBackend::new(Arc::new(NoOpLogger))));

        assert!(logger.contains(
            "MockSync configured\n   api: https://localhost:3000\n   rtc: https://localhost:3000"
        ));
        assert_eq!(f.service.backend().unwrap().name(), "MockSync");

        f.service.clear_backend();
        assert!(f.service.backend().is_none());
    }

    #[test]
    fn test_get_route1_logs_url() {
        let logger = Arc::new(RecordingLogger::new());
        let f = fixture(None, logger.clone());
        f.service
            .set_backend(Arc::new(MockSyncBackend::new(Arc::new(NoOpLogger))));

        let (completion, calls) = capture::<Route1Model>();
        f.service.get_route1(completion);

        assert!(calls.lock().unwrap()[0].is_some());
        assert!(logger.contains("URL: https://localhost:3000/route1"));
    }
}
