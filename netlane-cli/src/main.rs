//! netlane CLI - Command-line interface
//!
//! This binary drives the netlane request pipeline from the command line.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use netlane::backend::BackendKind;

use commands::config::ConfigCommands;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "netlane")]
#[command(version = netlane::VERSION)]
#[command(about = "Issue route requests through lane-scheduled backends", long_about = None)]
struct Args {
    /// Enable debug-level logging regardless of RUST_LOG
    #[arg(long, global = true)]
    debug: bool,

    /// Backend to use: mock_sync, mock_async, native, library, default
    ///
    /// Overrides APP_NETWORK_* environment flags and the config file.
    #[arg(long, global = true)]
    backend: Option<BackendKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch /route1 and print the model
    Route1,

    /// Post device details to /route2 and print the model and its archive
    Route2 {
        /// Bearer token to authorize with; persisted on success
        #[arg(long)]
        token: String,
    },

    /// Print the lane to queue table and run a barrier demonstration
    Lanes,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        // Config commands work without logging so they never touch the log file
        Commands::Config { command } => commands::config::run(command),
        Commands::Route1 => {
            let runner = CliRunner::with_debug(args.debug)?;
            commands::route::run_route1(&runner, args.backend)
        }
        Commands::Route2 { token } => {
            let runner = CliRunner::with_debug(args.debug)?;
            commands::route::run_route2(&runner, args.backend, &token)
        }
        Commands::Lanes => {
            let runner = CliRunner::with_debug(args.debug)?;
            commands::lanes::run(&runner)
        }
    }
}
