//! Structured logging setup for ltapp
//!
//! Everything in the workspace logs through `tracing`; this crate only owns
//! installing the global subscriber from the logging domain configuration.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
