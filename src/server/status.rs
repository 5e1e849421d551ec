//! # Status Signals
//!
//! Every lifecycle event produces one human-readable line:
//!
//! ```text
//! Server <id> : starting
//! Server <id> : stopping
//! Server <id> : processing
//! Server <id> : Process will run for <d> sec
//! ```
//!
//! Lines go to a [`StatusSink`]. [`LogSink`] forwards them to the logger,
//! [`RecordingSink`] keeps them for inspection.

use std::fmt;
use std::sync::{Arc, Mutex};

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Starting,
    Stopping,
    Processing,
    /// Announced duration of the upcoming process call
    WillRun(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEvent {
    pub server_id: u32,
    pub kind: StatusKind,
}

impl StatusEvent {
    pub fn new(server_id: u32, kind: StatusKind) -> Self {
        Self { server_id, kind }
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StatusKind::Starting => write!(f, "Server {} : starting", self.server_id),
            StatusKind::Stopping => write!(f, "Server {} : stopping", self.server_id),
            StatusKind::Processing => write!(f, "Server {} : processing", self.server_id),
            StatusKind::WillRun(duration) => write!(
                f,
                "Server {} : Process will run for {} sec",
                self.server_id, duration
            ),
        }
    }
}

/// Destination for status events.
pub trait StatusSink: Send + Sync {
    fn emit(&self, event: &StatusEvent);
}

/// Writes status lines at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn emit(&self, event: &StatusEvent) {
        info!("{}", event);
    }
}

/// Keeps every event in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<StatusEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StatusEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Events rendered as status lines.
    pub fn lines(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }
}

impl StatusSink for RecordingSink {
    fn emit(&self, event: &StatusEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(*event);
    }
}
