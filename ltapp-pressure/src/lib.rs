//! Resource pressure for ltapp
//!
//! This crate provides the CPU burn and memory growth generators, and the
//! [`LoadController`] that the transport layer drives them through.

pub mod controller;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod state;

// Re-export commonly used types
pub use controller::{LoadController, LoadStatus};
pub use cpu::{CpuPressureGenerator, CpuStatus};
pub use error::{PressureError, PressureResult};
pub use memory::{MemoryPressureGenerator, MemoryStatus, RetentionPool};
pub use state::{GeneratorState, Transition};
