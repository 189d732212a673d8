//! Generator lifecycle state

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a pressure generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneratorState {
    Stopped,
    Running,
    Stopping,
}

impl GeneratorState {
    fn as_u8(self) -> u8 {
        match self {
            GeneratorState::Stopped => 0,
            GeneratorState::Running => 1,
            GeneratorState::Stopping => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => GeneratorState::Running,
            2 => GeneratorState::Stopping,
            _ => GeneratorState::Stopped,
        }
    }
}

impl fmt::Display for GeneratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorState::Stopped => write!(f, "stopped"),
            GeneratorState::Running => write!(f, "running"),
            GeneratorState::Stopping => write!(f, "stopping"),
        }
    }
}

/// Outcome of a start or stop request.
///
/// Repeated requests are reported as `AlreadyRunning` / `AlreadyStopped`
/// rather than as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    /// A running generator was stopped and started again with new settings
    Restarted,
    AlreadyRunning,
    Stopped,
    AlreadyStopped,
}

/// State cell readable without taking the generator's lifecycle lock
#[derive(Debug)]
pub(crate) struct AtomicState(AtomicU8);

impl AtomicState {
    pub(crate) fn new(state: GeneratorState) -> Self {
        Self(AtomicU8::new(state.as_u8()))
    }

    pub(crate) fn load(&self) -> GeneratorState {
        GeneratorState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, state: GeneratorState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }
}

/// Settles a generator at `Stopped` when dropped.
///
/// Held across drain awaits so a dropped stop future cannot leave the
/// generator parked in `Stopping` with no run to finish.
pub(crate) struct StoppedOnDrop<'a>(&'a AtomicState);

impl<'a> StoppedOnDrop<'a> {
    pub(crate) fn stopping(state: &'a AtomicState) -> Self {
        state.store(GeneratorState::Stopping);
        Self(state)
    }
}

impl Drop for StoppedOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(GeneratorState::Stopped);
    }
}
