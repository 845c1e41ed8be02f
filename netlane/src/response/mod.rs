//! Turning transfer results into models.
//!
//! Every backend funnels its [`TransferResult`](crate::backend::TransferResult)
//! through [`handle_results`], which applies the same steps in order:
//!
//! 1. a transport error ends processing
//! 2. a nested error envelope in pre-parsed JSON replaces the payload
//! 3. a missing payload ends processing
//! 4. the payload is decoded into the route's model
//! 5. the model's version is resolved
//!
//! Failures are logged and delivered as `None`. The completion runs exactly
//! once per call.

pub mod envelope;
mod error;
mod processor;

pub use error::ResponseError;
pub use processor::{handle_results, process};

pub(crate) use processor::{deliver, CompletionGuard};

use std::sync::Arc;

/// Callback receiving the outcome of one request.
///
/// Invoked on whatever thread or lane the backend finishes on.
pub type Completion<M> = Arc<dyn Fn(Option<M>) + Send + Sync>;
