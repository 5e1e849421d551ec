//! # Server Binary Entry Point
//!
//! Thin wrapper that builds one server unit and runs the classroom scenario
//! against it.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin server -- --config config/server.toml
//! cargo run --bin server -- --seed 7 --time-unit-ms 100 --summary run.json
//! ```
//!
//! Ctrl-C interrupts a pending `process` wait; the run then stops with
//! exit status 130.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;

use server_unit::common::logging::init_logger;
use server_unit::server::{
    DurationSource, IdIssuer, LogSink, RandomDurations, ScriptedDurations, ServerConfig,
    ShutdownSignal,
};
use server_unit::{Scenario, ServerError, ServerUnit};

/// Exit status used when the run is interrupted
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Command-line arguments for the server binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the server configuration file (TOML format)
    ///
    /// Example: config/server.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random duration source
    #[arg(long)]
    seed: Option<u64>,

    /// Comma separated durations to replay instead of random draws
    #[arg(long, value_delimiter = ',')]
    durations: Option<Vec<u64>>,

    /// Milliseconds per duration unit (overrides the config file)
    #[arg(long)]
    time_unit_ms: Option<u64>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logger();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(time_unit_ms) = args.time_unit_ms {
        config.process.time_unit_ms = time_unit_ms;
    }

    let durations: Box<dyn DurationSource + Send> = match (args.durations, args.seed) {
        (Some(script), _) => Box::new(ScriptedDurations::within(
            script,
            config.process.max_duration,
        )?),
        (None, Some(seed)) => Box::new(RandomDurations::seeded(seed)),
        (None, None) => Box::new(RandomDurations::from_entropy()),
    };

    // Ctrl-C interrupts the pending wait
    let shutdown = ShutdownSignal::new();
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), interrupting server");
                shutdown_for_signal.trigger();
            }
            Err(e) => error!("❌ Failed to listen for SIGINT: {}", e),
        }
    });

    let mut issuer = IdIssuer::new(config.server.first_id);
    let mut unit = ServerUnit::new(&mut issuer, config.process, durations, Arc::new(LogSink))?;

    match Scenario::classroom().run(&mut unit, &shutdown).await {
        Ok(summary) => {
            if let Some(path) = &args.summary {
                summary.export_to_json(path)?;
                info!("📝 Run summary written to {}", path.display());
            }
            Ok(())
        }
        Err(e @ ServerError::Interrupted { .. }) => {
            error!("❌ {}", e);
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        Err(e) => Err(e.into()),
    }
}
