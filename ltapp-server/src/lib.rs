//! ltapp server
//!
//! Wires configuration, logging, the pressure generators and the message
//! service into a single HTTP server.

pub mod services;
pub mod startup;

// Re-export main components
pub use services::ServiceContainer;
pub use startup::{shutdown_signal, Server};
