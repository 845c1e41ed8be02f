//! The shared response pipeline.

use std::panic::{self, AssertUnwindSafe};

use super::envelope;
use super::{Completion, ResponseError};
use crate::backend::TransferResult;
use crate::log::Logger;
use crate::model::Model;
use crate::{log_debug, log_warn};

/// Turn a transfer result into a model.
///
/// Returns the first failure encountered; a server-reported error still
/// yields a model, with its `error` field set.
pub fn process<M: Model>(result: TransferResult, logger: &dyn Logger) -> Result<M, ResponseError> {
    let TransferResult { data, error, json } = result;

    if let Some(error) = error {
        return Err(ResponseError::Transport(error));
    }

    let mut data = data;
    if let Some(json) = &json {
        log_debug!(logger, "json received: {}", json);
        if let Some(flat) = envelope::flatten(json) {
            data = Some(flat);
        }
    }

    let data = data.ok_or(ResponseError::NoData)?;

    serde_json::from_slice::<M>(&data)
        .map(Model::upgraded)
        .map_err(|e| ResponseError::Decode {
            model: M::NAME,
            reason: e.to_string(),
        })
}

/// Process `result` and hand the outcome to `completion`.
///
/// Failures are logged and delivered as `None`. `completion` runs exactly
/// once, including when decoding panics; the panic is logged and `None`
/// is delivered instead.
pub fn handle_results<M: Model>(
    result: TransferResult,
    logger: &dyn Logger,
    completion: Completion<M>,
) {
    deliver(result, logger, CompletionGuard::new(completion));
}

/// [`handle_results`] for a completion already wrapped in a guard.
///
/// Backends that hand work to another thread create the guard first, so a
/// task dropped before it runs still completes with `None`.
pub(crate) fn deliver<M: Model>(
    result: TransferResult,
    logger: &dyn Logger,
    mut guard: CompletionGuard<M>,
) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| process::<M>(result, logger)));
    let model = match outcome {
        Ok(Ok(model)) => Some(model),
        Ok(Err(e)) => {
            log_warn!(logger, "{} request failed: {}", M::NAME, e);
            None
        }
        Err(payload) => {
            log_warn!(
                logger,
                "{} processing panicked: {}",
                M::NAME,
                crate::scheduler::panic_message(payload.as_ref())
            );
            None
        }
    };

    guard.complete(model);
}

/// Delivers `None` on drop unless a value was delivered first.
pub(crate) struct CompletionGuard<M> {
    completion: Option<Completion<M>>,
}

impl<M> CompletionGuard<M> {
    pub(crate) fn new(completion: Completion<M>) -> Self {
        Self {
            completion: Some(completion),
        }
    }

    /// Hand the completion over to another owner, disarming the guard.
    pub(crate) fn take(&mut self) -> Option<Completion<M>> {
        self.completion.take()
    }

    fn complete(&mut self, model: Option<M>) {
        if let Some(completion) = self.completion.take() {
            completion(model);
        }
    }
}

impl<M> Drop for CompletionGuard<M> {
    fn drop(&mut self) {
        if let Some(completion) = self.completion.take() {
            completion(None);
        }
    }
}
