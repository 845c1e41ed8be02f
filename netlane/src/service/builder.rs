//! Assembling a [`NetworkService`] from configuration.
//!
//! Each step is a small function so callers (the CLI, tests) can build only
//! the pieces they need.

use std::sync::Arc;

use super::error::ServiceError;
use super::facade::NetworkService;
use crate::backend::{BackendFactory, BackendKind};
use crate::config::ConfigFile;
use crate::device::DeviceInfo;
use crate::log::Logger;
use crate::log_info;
use crate::route::{Environment, RequestBuilder};
use crate::scheduler::{Scheduler, SchedulerConfig};
use crate::settings::{Credentials, IniSettingsStore};

/// Everything a running client needs.
pub struct ServiceComponents {
    /// Shared lanes
    pub scheduler: Arc<Scheduler>,
    /// Builds further backends on the same scheduler
    pub factory: BackendFactory,
    /// Backend installed on the service
    pub backend_kind: BackendKind,
    /// The facade, backend installed
    pub service: NetworkService,
}

/// Start a scheduler sized from the `[scheduler]` section.
pub fn create_scheduler(
    config: &ConfigFile,
    logger: Arc<dyn Logger>,
) -> Result<Arc<Scheduler>, ServiceError> {
    // Checked before `SchedulerConfig::from` clamps widths to 1.
    let settings = &config.scheduler;
    if settings.global_width == 0 || settings.local_width == 0 {
        return Err(ServiceError::ConfigError(
            "scheduler widths must be positive".to_string(),
        ));
    }
    let scheduler_config = SchedulerConfig::from(settings);
    Ok(Arc::new(Scheduler::new(scheduler_config, logger)?))
}

/// Token store backed by the `[settings]` file.
pub fn create_credentials(config: &ConfigFile, logger: Arc<dyn Logger>) -> Arc<Credentials> {
    let store = Arc::new(IniSettingsStore::new(config.store.file.clone()));
    Arc::new(Credentials::new(
        store,
        config.auth.default_token.clone(),
        logger,
    ))
}

/// Request builder for the configured environment.
pub fn create_request_builder(
    config: &ConfigFile,
    credentials: Arc<Credentials>,
    logger: Arc<dyn Logger>,
) -> RequestBuilder {
    RequestBuilder::new(
        Environment::from(&config.environment),
        config.auth.app_id.clone(),
        credentials,
        logger,
    )
}

/// Backend kind to install: `requested` if given, else environment flags,
/// else the config file.
pub fn select_backend(config: &ConfigFile, requested: Option<BackendKind>) -> BackendKind {
    requested.unwrap_or_else(|| BackendKind::from_env(config.network.backend))
}

/// Build the whole stack and install the selected backend.
pub fn build_service(
    config: &ConfigFile,
    requested: Option<BackendKind>,
    logger: Arc<dyn Logger>,
) -> Result<ServiceComponents, ServiceError> {
    let scheduler = create_scheduler(config, Arc::clone(&logger))?;
    let factory = BackendFactory::new(Arc::clone(&scheduler), Arc::clone(&logger))
        .with_timeout(config.network.timeout);

    let backend_kind = select_backend(config, requested);
    let backend = factory.create(backend_kind)?;
    log_info!(logger, "backend selected: {}", backend_kind);

    let credentials = create_credentials(config, Arc::clone(&logger));
    let builder = create_request_builder(config, credentials, Arc::clone(&logger));
    let service = NetworkService::new(builder, DeviceInfo::collect(), logger);
    service.set_backend(backend);

    Ok(ServiceComponents {
        scheduler,
        factory,
        backend_kind,
        service,
    })
}
