//! # Scenario Driver
//!
//! A scenario is a fixed list of lifecycle calls run against one server unit.
//! The classroom scenario is the sequence the server binary executes:
//!
//! ```text
//! process, process, process, process, start, start, process, stop, process, stop, stop
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::server::error::{Result, ServerError};
use crate::server::{ServerUnit, ShutdownSignal, UnitStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Start,
    Stop,
    Process,
}

/// Outcome of a scenario that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub server_id: u32,
    pub steps_run: usize,
    pub final_elapsed_time: u64,
    pub stats: UnitStats,
}

impl RunSummary {
    /// Write the summary as pretty-printed JSON.
    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json_string = serde_json::to_string_pretty(self).map_err(ServerError::SummaryEncode)?;
        let io_error = |source: std::io::Error| ServerError::SummaryIo {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::create(path).map_err(io_error)?;
        file.write_all(json_string.as_bytes()).map_err(io_error)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn classroom() -> Self {
        use Step::*;
        Self::new(vec![
            Process, Process, Process, Process, Start, Start, Process, Stop, Process, Stop, Stop,
        ])
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order against `unit`.
    ///
    /// Stops at the first interruption and returns it; steps after it are not
    /// run.
    pub async fn run(&self, unit: &mut ServerUnit, shutdown: &ShutdownSignal) -> Result<RunSummary> {
        info!(
            "🚀 Running {} steps against server {}",
            self.steps.len(),
            unit.id()
        );

        for (index, step) in self.steps.iter().enumerate() {
            debug!("Step {}/{}: {:?}", index + 1, self.steps.len(), step);
            match step {
                Step::Start => unit.start(),
                Step::Stop => unit.stop(),
                Step::Process => {
                    unit.process(shutdown).await?;
                }
            }
        }

        let summary = RunSummary {
            server_id: unit.id(),
            steps_run: self.steps.len(),
            final_elapsed_time: unit.elapsed_time(),
            stats: unit.stats().clone(),
        };

        info!(
            "✅ Server {} finished: {} process calls, {} units drawn",
            summary.server_id, summary.stats.process_calls, summary.stats.total_drawn
        );

        Ok(summary)
    }
}
