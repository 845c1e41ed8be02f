//! Physical worker queues.
//!
//! Each queue is a dispatcher task on the scheduler's runtime reading jobs
//! from an unbounded channel. Jobs run on the runtime's blocking pool.
//!
//! Two primitives give a queue its semantics:
//!
//! - a [`Semaphore`] sized to the queue width bounds parallelism (a width
//!   of one makes the queue FIFO, since permits are taken in dispatch order)
//! - a [`RwLock`] gate: ordinary jobs hold a read guard while running, a
//!   barrier job holds the write guard, so it starts after every earlier
//!   job has finished and every later job starts after it

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, RwLock, Semaphore};

use super::lane::QueueId;
use super::SchedulerError;
use crate::log::Logger;
use crate::{log_debug, log_error};

/// Unit of work accepted by a queue.
pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;

pub(crate) enum Job {
    Task(Task),
    Barrier(Task),
}

/// Sending side of a worker queue.
#[derive(Clone)]
pub(crate) struct WorkerQueue {
    id: QueueId,
    label: Arc<str>,
    sender: mpsc::UnboundedSender<Job>,
}

impl WorkerQueue {
    /// Start the dispatcher for a queue on `handle`.
    pub(crate) fn spawn(
        id: QueueId,
        label: String,
        width: usize,
        handle: &Handle,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let label: Arc<str> = Arc::from(label);
        let width = if id.is_serial() { 1 } else { width.max(1) };

        log_debug!(logger, "queue {} started (width {})", label, width);
        handle.spawn(dispatch(
            Arc::clone(&label),
            receiver,
            width,
            handle.clone(),
            logger,
        ));

        Self { id, label, sender }
    }

    pub(crate) fn id(&self) -> QueueId {
        self.id
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn submit(&self, job: Job) -> Result<(), SchedulerError> {
        self.sender
            .send(job)
            .map_err(|_| SchedulerError::QueueClosed {
                queue: self.label.to_string(),
            })
    }
}

async fn dispatch(
    label: Arc<str>,
    mut receiver: mpsc::UnboundedReceiver<Job>,
    width: usize,
    handle: Handle,
    logger: Arc<dyn Logger>,
) {
    let slots = Arc::new(Semaphore::new(width));
    let gate = Arc::new(RwLock::new(()));

    while let Some(job) = receiver.recv().await {
        match job {
            Job::Task(task) => {
                let shared = Arc::clone(&gate).read_owned().await;
                let Ok(slot) = Arc::clone(&slots).acquire_owned().await else {
                    break;
                };
                let label = Arc::clone(&label);
                let logger = Arc::clone(&logger);
                handle.spawn_blocking(move || {
                    run_guarded(&label, task, logger.as_ref());
                    drop(slot);
                    drop(shared);
                });
            }
            Job::Barrier(task) => {
                let exclusive = Arc::clone(&gate).write_owned().await;
                let label = Arc::clone(&label);
                let logger = Arc::clone(&logger);
                handle.spawn_blocking(move || {
                    run_guarded(&label, task, logger.as_ref());
                    drop(exclusive);
                });
            }
        }
    }

    log_debug!(logger, "queue {} stopped", label);
}

/// Run a task, containing any panic to the task itself.
pub(crate) fn run_guarded(label: &str, task: Task, logger: &dyn Logger) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
        log_error!(
            logger,
            "task on {} panicked: {}",
            label,
            panic_message(payload.as_ref())
        );
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
