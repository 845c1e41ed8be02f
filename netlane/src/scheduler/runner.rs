//! The scheduler service object.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::runtime::{Builder, Handle, Runtime};

use super::config::SchedulerConfig;
use super::lane::{Lane, QosClass, QueueId};
use super::main_lane::MainLane;
use super::queue::{Job, Task, WorkerQueue};
use super::SchedulerError;
use crate::log::Logger;
use crate::{log_info, log_warn};

/// Runs work on named lanes.
///
/// Owns a tokio runtime whose blocking pool executes lane tasks, one
/// dispatcher per physical queue, and the main lane thread. Everything is
/// created in [`Scheduler::new`] and torn down when the scheduler drops.
///
/// The `*_sync` methods block the calling thread until the task finishes.
/// Calling one from a task already running on the target serial queue
/// deadlocks, and calling one from async code on the scheduler's own
/// runtime stalls a worker; use the async variants there.
///
/// # Example
///
/// ```
/// use netlane::log::NoOpLogger;
/// use netlane::scheduler::{Lane, Scheduler, SchedulerConfig};
/// use std::sync::Arc;
///
/// let scheduler = Scheduler::new(SchedulerConfig::default(), Arc::new(NoOpLogger)).unwrap();
/// let answer = scheduler.run_barrier_sync(Lane::LocalMid, || 6 * 7).unwrap();
/// assert_eq!(answer, 42);
/// ```
pub struct Scheduler {
    runtime: Option<Runtime>,
    handle: Handle,
    main: MainLane,
    queues: HashMap<QueueId, WorkerQueue>,
    config: SchedulerConfig,
    logger: Arc<dyn Logger>,
}

impl Scheduler {
    /// Start the worker pool, every physical queue and the main lane.
    pub fn new(config: SchedulerConfig, logger: Arc<dyn Logger>) -> Result<Self, SchedulerError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .max_blocking_threads(config.max_blocking_threads.max(1))
            .thread_name("netlane-worker")
            .enable_time()
            .build()
            .map_err(SchedulerError::Runtime)?;
        let handle = runtime.handle().clone();

        let queues = QueueId::WORKER_QUEUES
            .into_iter()
            .map(|id| {
                let width = match id {
                    QueueId::Global(_) => config.global_width,
                    _ => config.local_width,
                };
                let queue = WorkerQueue::spawn(
                    id,
                    id.label(&config.label_prefix),
                    width,
                    &handle,
                    Arc::clone(&logger),
                );
                (id, queue)
            })
            .collect();

        let main = MainLane::start(Arc::clone(&logger))?;

        log_info!(
            logger,
            "scheduler started: {} workers, {} task threads, widths {}/{}",
            config.worker_threads,
            config.max_blocking_threads,
            config.global_width,
            config.local_width
        );

        Ok(Self {
            runtime: Some(runtime),
            handle,
            main,
            queues,
            config,
            logger,
        })
    }

    /// Runtime handle, for spawning async work next to the lanes.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Physical queue `lane` resolves to.
    pub fn queue_for(&self, lane: Lane) -> QueueId {
        lane.queue(self.config.alias_mid_serial)
    }

    /// Label of the physical queue `lane` resolves to.
    pub fn queue_label(&self, lane: Lane) -> String {
        self.queue(lane).label().to_string()
    }

    /// Whether the calling thread is the main lane.
    pub fn is_main_lane(&self) -> bool {
        self.main.is_current()
    }

    /// One row per lane: lane, physical queue label, serial flag, priority value.
    pub fn lane_table(&self) -> Vec<(Lane, String, bool, u32)> {
        Lane::ALL
            .into_iter()
            .map(|lane| {
                let queue = self.queue_for(lane);
                let qos = match queue {
                    QueueId::Main => QosClass::UserInteractive,
                    QueueId::Global(q) | QueueId::LocalConcurrent(q) | QueueId::LocalSerial(q) => q,
                };
                (lane, self.queue_label(lane), queue.is_serial(), qos.raw())
            })
            .collect()
    }

    // =========================================================================
    // Fire and forget
    // =========================================================================

    /// Queue `task` on `lane`.
    pub fn run_async<F>(&self, lane: Lane, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(lane, Job::Task(Box::new(task)));
    }

    /// Queue `task` on `lane` after `delay_ms` milliseconds.
    ///
    /// Negative delays count as zero.
    pub fn run_after<F>(&self, lane: Lane, delay_ms: i64, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(delay) = clamp_delay(delay_ms) else {
            self.run_async(lane, task);
            return;
        };

        let queue = self.queue(lane).clone();
        let logger = Arc::clone(&self.logger);
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = queue.submit(Job::Task(Box::new(task))) {
                log_warn!(logger, "delayed task dropped: {}", e);
            }
        });
    }

    /// Queue `task` as a barrier on `lane`.
    ///
    /// It starts once everything queued earlier on the same physical queue
    /// has finished, and nothing queued later starts until it returns.
    pub fn run_barrier_async<F>(&self, lane: Lane, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(lane, Job::Barrier(Box::new(task)));
    }

    /// Queue `task` on the main lane.
    pub fn main_async<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Err(e) = self.main.submit(Box::new(task)) {
            log_warn!(self.logger, "main lane task dropped: {}", e);
        }
    }

    /// Queue `task` on the main lane after `delay_ms` milliseconds.
    pub fn main_after<F>(&self, delay_ms: i64, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(delay) = clamp_delay(delay_ms) else {
            self.main_async(task);
            return;
        };

        let sender = self.main.sender();
        let logger = Arc::clone(&self.logger);
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let task: Task = Box::new(task);
            if sender.send(task).is_err() {
                log_warn!(logger, "delayed main lane task dropped: main lane stopped");
            }
        });
    }

    // =========================================================================
    // Blocking
    // =========================================================================

    /// Run `task` on the main lane and wait for its result.
    ///
    /// Runs inline when already on the main lane. A panic in `task` is
    /// resumed on the calling thread.
    pub fn run_sync<F, R>(&self, task: F) -> Result<R, SchedulerError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_main_lane() {
            return Ok(task());
        }

        let (tx, rx) = mpsc::channel();
        self.main.submit(Box::new(move || {
            let _ = tx.send(panic::catch_unwind(AssertUnwindSafe(task)));
        }))?;
        wait(rx, "main")
    }

    /// Run `task` on the local serial utility queue and wait for its result.
    pub fn background_sync<F, R>(&self, task: F) -> Result<R, SchedulerError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.lane_sync(Lane::LocalLoSerial, task, false)
    }

    /// Run `task` as a barrier on `lane` and wait for its result.
    pub fn run_barrier_sync<F, R>(&self, lane: Lane, task: F) -> Result<R, SchedulerError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.lane_sync(lane, task, true)
    }

    fn lane_sync<F, R>(&self, lane: Lane, task: F, barrier: bool) -> Result<R, SchedulerError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let task: Task = Box::new(move || {
            let _ = tx.send(panic::catch_unwind(AssertUnwindSafe(task)));
        });
        let job = if barrier {
            Job::Barrier(task)
        } else {
            Job::Task(task)
        };

        let queue = self.queue(lane);
        queue.submit(job)?;
        wait(rx, queue.label())
    }

    fn submit(&self, lane: Lane, job: Job) {
        let queue = self.queue(lane);
        if let Err(e) = queue.submit(job) {
            log_warn!(self.logger, "task for {} ({:?}) dropped: {}", lane, queue.id(), e);
        }
    }

    fn queue(&self, lane: Lane) -> &WorkerQueue {
        // Every lane resolves to one of the queues built in `new`.
        &self.queues[&self.queue_for(lane)]
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        // Safe from any context, including the runtime's own threads.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("queues", &self.queues.len())
            .finish()
    }
}

fn clamp_delay(delay_ms: i64) -> Option<Duration> {
    match delay_ms.max(0) as u64 {
        0 => None,
        ms => Some(Duration::from_millis(ms)),
    }
}

fn wait<R>(rx: mpsc::Receiver<thread::Result<R>>, label: &str) -> Result<R, SchedulerError> {
    match rx.recv() {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(payload)) => panic::resume_unwind(payload),
        Err(_) => Err(SchedulerError::QueueClosed {
            queue: label.to_string(),
        }),
    }
}
