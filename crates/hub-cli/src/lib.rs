//! Hub CLI
//!
//! Configuration, logging and subcommands behind the `chemhub` binary.
//! The core crates never read the environment; this crate loads the
//! config file, freezes the admin identity and wires the engines to the
//! filesystem.

#![warn(unreachable_pub)]

// Core modules
pub mod commands;
pub mod config;
pub mod logging;

// Re-exports
pub use commands::{
    export_summary, pick_file, run_export, run_submit, ExportArgs, SubmitArgs,
};
pub use config::{ConfigError, ExportConfig, HubConfig};
pub use logging::{init_logging, LogConfig, LogFormat};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
