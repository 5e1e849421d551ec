pub mod config;
pub mod durations;
pub mod error;
pub mod id_issuer;
pub mod metrics;
pub mod server;
pub mod shutdown;
pub mod status;

pub use config::{ProcessConfig, ServerConfig};
pub use durations::{DurationSource, RandomDurations, ScriptedDurations};
pub use error::ServerError;
pub use id_issuer::IdIssuer;
pub use metrics::UnitStats;
pub use server::{ProcessReport, ServerUnit};
pub use shutdown::{ShutdownSignal, WaitOutcome};
pub use status::{LogSink, RecordingSink, StatusEvent, StatusKind, StatusSink};
