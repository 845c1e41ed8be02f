//! The main lane: one dedicated thread draining a FIFO channel.

use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use super::queue::{run_guarded, Task};
use super::SchedulerError;
use crate::log::Logger;
use crate::log_debug;

const MAIN_LANE_LABEL: &str = "main";

/// Handle to the main lane thread.
///
/// The thread exits once every sender is dropped and the backlog is drained.
pub(crate) struct MainLane {
    sender: Sender<Task>,
    thread_id: ThreadId,
}

impl MainLane {
    pub(crate) fn start(logger: Arc<dyn Logger>) -> Result<Self, SchedulerError> {
        let (sender, receiver) = mpsc::channel::<Task>();

        let handle = thread::Builder::new()
            .name("main-lane".to_string())
            .spawn(move || {
                for task in receiver {
                    run_guarded(MAIN_LANE_LABEL, task, logger.as_ref());
                }
                log_debug!(logger, "main lane stopped");
            })
            .map_err(SchedulerError::Thread)?;

        Ok(Self {
            sender,
            thread_id: handle.thread().id(),
        })
    }

    pub(crate) fn submit(&self, task: Task) -> Result<(), SchedulerError> {
        self.sender
            .send(task)
            .map_err(|_| SchedulerError::QueueClosed {
                queue: MAIN_LANE_LABEL.to_string(),
            })
    }

    /// A sender usable from other threads (delayed submissions).
    pub(crate) fn sender(&self) -> Sender<Task> {
        self.sender.clone()
    }

    pub(crate) fn is_current(&self) -> bool {
        thread::current().id() == self.thread_id
    }
}
