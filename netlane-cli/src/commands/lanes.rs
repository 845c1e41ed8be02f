//! Lanes command - show how lanes map onto queues and demonstrate barriers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use netlane::log::TracingLogger;
use netlane::scheduler::{Lane, Scheduler, SchedulerConfig};
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Tasks submitted around the barrier in the demo.
const DEMO_TASKS: usize = 12;

/// Run the lanes command.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("lanes");
    let config = SchedulerConfig::from(&runner.config().scheduler);
    let scheduler = Scheduler::new(config, Arc::new(TracingLogger::new()))?;

    println!("{:<18} {:<32} {:<10} {:>8}", "Lane", "Queue", "Kind", "Priority");
    println!("{}", "-".repeat(71));
    for (lane, label, serial, priority) in scheduler.lane_table() {
        let kind = if serial { "serial" } else { "concurrent" };
        println!("{:<18} {:<32} {:<10} {:>#8x}", lane.name(), label, kind, priority);
    }
    println!();

    run_barrier_demo(&scheduler)
}

fn run_barrier_demo(scheduler: &Scheduler) -> Result<(), CliError> {
    let lane = Lane::LocalMid;
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let started = Instant::now();

    for _ in 0..DEMO_TASKS / 2 {
        submit_sleeper(scheduler, lane, &running, &peak);
    }

    let observed = {
        let running = Arc::clone(&running);
        scheduler.run_barrier_sync(lane, move || running.fetch_add(1, Ordering::SeqCst) + 1)?
    };
    running.fetch_sub(1, Ordering::SeqCst);

    for _ in DEMO_TASKS / 2..DEMO_TASKS {
        submit_sleeper(scheduler, lane, &running, &peak);
    }
    // Drains everything queued above.
    scheduler.run_barrier_sync(lane, || ())?;

    info!("barrier demo finished in {:?}", started.elapsed());
    println!("Barrier demo on {} ({}):", lane, scheduler.queue_label(lane));
    println!("  tasks around barrier: {}", DEMO_TASKS);
    println!("  peak concurrency:     {}", peak.load(Ordering::SeqCst));
    println!("  running with barrier: {}", observed);
    println!("  width:                {}", scheduler.config().local_width);
    Ok(())
}

fn submit_sleeper(
    scheduler: &Scheduler,
    lane: Lane,
    running: &Arc<AtomicUsize>,
    peak: &Arc<AtomicUsize>,
) {
    let running = Arc::clone(running);
    let peak = Arc::clone(peak);
    scheduler.run_async(lane, move || {
        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        running.fetch_sub(1, Ordering::SeqCst);
    });
}
