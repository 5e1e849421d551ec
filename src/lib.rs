//! # Server Unit
//!
//! A single simulated server with `start`, `stop` and `process` lifecycle
//! operations, driven sequentially by one caller.
//!
//! ## Modules
//!
//! - [`server`]: the server unit and its collaborators (identifier issuer,
//!   duration sources, shutdown signal, status output, counters)
//! - [`scenario`]: fixed call sequences run against a unit
//! - [`common`]: configuration loading and logging

pub mod common;
pub mod scenario;
pub mod server;

pub use scenario::{RunSummary, Scenario, Step};
pub use server::{ServerError, ServerUnit};
