//! netlane - lane-scheduled HTTP client for a two-route API
//!
//! The library builds route requests, executes them through a swappable
//! backend and turns the responses into versioned models. Work runs on
//! named scheduler lanes rather than ad-hoc threads.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use netlane::config::ConfigFile;
//! use netlane::log::TracingLogger;
//! use netlane::service::build_service;
//!
//! let config = ConfigFile::load()?;
//! let components = build_service(&config, None, Arc::new(TracingLogger::new()))?;
//!
//! components.service.post_route2("token", Arc::new(|model| {
//!     println!("{:?}", model);
//! }));
//! ```
//!
//! # Modules
//!
//! - [`scheduler`]: named lanes over a tokio worker pool
//! - [`route`]: route definitions and request construction
//! - [`backend`]: transfer mechanisms, live and mocked
//! - [`response`]: the shared response pipeline
//! - [`model`]: versioned response models
//! - [`settings`]: persisted token with transactional updates

pub mod backend;
pub mod config;
pub mod device;
pub mod log;
pub mod logging;
pub mod model;
pub mod response;
pub mod route;
pub mod scheduler;
pub mod service;
pub mod settings;

/// Version of the netlane library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
