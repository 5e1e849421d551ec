//! # Common Components
//!
//! Shared utilities used by the library and the server binary.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration loading
//! - [`logging`]: Logger initialization

pub mod config;
pub mod logging;
