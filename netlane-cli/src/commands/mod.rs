//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`lanes`] - Lane table and barrier demonstration
//! - [`route`] - Invoke `/route1` and `/route2`

pub mod config;
pub mod lanes;
pub mod route;
