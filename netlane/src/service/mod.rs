//! High-level service facade.
//!
//! [`NetworkService`] is what applications talk to: it builds route
//! requests, hands them to the active backend and keeps the persisted token
//! in step with request outcomes. [`build_service`] wires one up from a
//! [`ConfigFile`](crate::config::ConfigFile).
//!
//! # Example
//!
//! ```no_run
//! use netlane::config::ConfigFile;
//! use netlane::log::TracingLogger;
//! use netlane::service::build_service;
//! use std::sync::Arc;
//!
//! let config = ConfigFile::load()?;
//! let components = build_service(&config, None, Arc::new(TracingLogger::new()))?;
//! components.service.get_route1(Arc::new(|model| println!("{:?}", model)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod error;
mod facade;

pub use builder::{
    build_service, create_credentials, create_request_builder, create_scheduler, select_backend,
    ServiceComponents,
};
pub use error::ServiceError;
pub use facade::NetworkService;
