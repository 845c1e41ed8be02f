//! Route commands - issue one request and print what comes back.

use std::fmt::Display;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use netlane::backend::BackendKind;
use netlane::model::{Model, Route1Model, Route2Model};
use netlane::response::Completion;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Extra wait for further answers after the first one.
const SETTLE: Duration = Duration::from_millis(250);

/// Run the `route1` command.
pub fn run_route1(runner: &CliRunner, backend: Option<BackendKind>) -> Result<(), CliError> {
    runner.log_startup("route1");
    let components = runner.create_service(backend)?;

    let (completion, rx) = channel::<Route1Model>();
    components.service.get_route1(completion);

    let models = collect(rx, "route1", runner.config().network.timeout)?;
    for model in &models {
        print_model(model);
    }
    Ok(())
}

/// Run the `route2` command.
pub fn run_route2(
    runner: &CliRunner,
    backend: Option<BackendKind>,
    token: &str,
) -> Result<(), CliError> {
    runner.log_startup("route2");
    let components = runner.create_service(backend)?;

    let (completion, rx) = channel::<Route2Model>();
    components.service.post_route2(token, completion);

    let models = collect(rx, "route2", runner.config().network.timeout)?;
    for model in &models {
        print_model(model);
        let archive = serde_json::Value::Object(model.archive());
        println!("Archived:");
        println!(
            "{}",
            serde_json::to_string_pretty(&archive).unwrap_or_else(|_| archive.to_string())
        );
    }
    info!(
        "persisted token: {}",
        if components.service.credentials().token().is_empty() {
            "(none)"
        } else {
            "(set)"
        }
    );
    Ok(())
}

fn channel<M: Send + 'static>() -> (Completion<M>, Receiver<Option<M>>) {
    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    let completion: Completion<M> = Arc::new(move |model| {
        if let Ok(tx) = tx.lock() {
            let _ = tx.send(model);
        }
    });
    (completion, rx)
}

/// Wait for the first answer, then pick up any that follow shortly after.
fn collect<M>(rx: Receiver<Option<M>>, route: &'static str, secs: u64) -> Result<Vec<M>, CliError> {
    let first = rx
        .recv_timeout(Duration::from_secs(secs.max(1)))
        .map_err(|_| CliError::Timeout { route, secs })?;

    let mut answers = vec![first];
    while let Ok(next) = rx.recv_timeout(SETTLE) {
        answers.push(next);
    }
    if answers.len() > 1 {
        info!("{} answered {} times", route, answers.len());
    }

    let models: Vec<M> = answers.into_iter().flatten().collect();
    if models.is_empty() {
        return Err(CliError::NoModel { route });
    }
    Ok(models)
}

fn print_model<M: Model + Display>(model: &M) {
    println!("{}", model);
    if model.has_error() {
        println!("Server reported: {}", model.error());
    }
}
