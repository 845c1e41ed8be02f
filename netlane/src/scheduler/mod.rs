//! Named execution lanes.
//!
//! Callers pick *where* work runs by [`Lane`], not by thread. Nine lanes
//! resolve onto a smaller set of physical queues:
//!
//! - the main lane, a single dedicated thread
//! - five global priority queues, concurrent
//! - three local concurrent queues
//! - two local serial (FIFO) queues
//!
//! Concurrent queues bound parallelism by a configured width and give no
//! ordering between ordinary tasks. Barrier submissions
//! ([`Scheduler::run_barrier_sync`], [`Scheduler::run_barrier_async`]) run
//! alone on their queue: everything queued before them finishes first and
//! everything queued after waits for them.
//!
//! A panicking task only takes itself down. Fire-and-forget submissions log
//! the panic; blocking submissions resume it on the waiting thread.

mod config;
mod lane;
mod main_lane;
mod queue;
mod runner;

pub use config::SchedulerConfig;
pub use lane::{Lane, QosClass, QueueId};
pub use runner::Scheduler;

pub(crate) use queue::panic_message;

use thiserror::Error;

/// Scheduler failures.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Failed to start scheduler runtime: {0}")]
    Runtime(std::io::Error),

    #[error("Failed to spawn main lane thread: {0}")]
    Thread(std::io::Error),

    #[error("Queue '{queue}' is no longer accepting work")]
    QueueClosed { queue: String },
}
