//! CPU burn generator
//!
//! Workers are dedicated OS threads so the burn never occupies the async
//! runtime's own workers. Each run owns a [`CancellationToken`] and a drain
//! channel: every worker holds a sender clone, so the receiver resolves to
//! `None` once the last worker has exited.

use crate::error::{PressureError, PressureResult};
use crate::state::{AtomicState, GeneratorState, StoppedOnDrop, Transition};
use ltapp_config::LoadConfig;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Transcendental evaluations between two cancellation checks
const BATCH_SIZE: u32 = 1_024;

/// Snapshot of the CPU generator
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuStatus {
    pub state: GeneratorState,
    pub active_workers: usize,
    pub requested_workers: usize,
    pub iterations: u64,
}

struct CpuRun {
    token: CancellationToken,
    drained: mpsc::Receiver<()>,
}

/// Pool of busy-spinning worker threads
pub struct CpuPressureGenerator {
    max_threads: usize,
    stop_timeout: Duration,
    state: AtomicState,
    requested_workers: AtomicUsize,
    active_workers: Arc<AtomicUsize>,
    iterations: Arc<AtomicU64>,
    // Serializes start/stop; held across the drain wait
    run: Mutex<Option<CpuRun>>,
}

impl CpuPressureGenerator {
    pub fn new(max_threads: usize, stop_timeout: Duration) -> Self {
        Self {
            max_threads,
            stop_timeout,
            state: AtomicState::new(GeneratorState::Stopped),
            requested_workers: AtomicUsize::new(0),
            active_workers: Arc::new(AtomicUsize::new(0)),
            iterations: Arc::new(AtomicU64::new(0)),
            run: Mutex::new(None),
        }
    }

    pub fn from_config(config: &LoadConfig) -> Self {
        Self::new(config.max_cpu_threads, config.cpu_stop_timeout())
    }

    pub fn state(&self) -> GeneratorState {
        self.state.load()
    }

    pub fn is_running(&self) -> bool {
        self.state() == GeneratorState::Running
    }

    /// Completed inner batches across every run so far
    pub fn iterations(&self) -> u64 {
        self.iterations.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> CpuStatus {
        CpuStatus {
            state: self.state(),
            active_workers: self.active_workers.load(Ordering::Acquire),
            requested_workers: self.requested_workers.load(Ordering::Acquire),
            iterations: self.iterations(),
        }
    }

    /// Start `threads` workers, replacing any run already in progress.
    pub async fn start(&self, threads: usize) -> PressureResult<Transition> {
        if threads == 0 || threads > self.max_threads {
            return Err(PressureError::InvalidThreadCount {
                requested: threads,
                max: self.max_threads,
            });
        }

        let mut run = self.run.lock().await;

        let restarted = match run.take() {
            Some(previous) => {
                info!("Restarting CPU load; stopping previous run first");
                self.drain(previous).await;
                true
            }
            None => false,
        };

        let token = CancellationToken::new();
        let (done_tx, drained) = mpsc::channel::<()>(1);

        for index in 0..threads {
            let worker = CpuWorker {
                index,
                token: token.clone(),
                iterations: self.iterations.clone(),
                guard: WorkerGuard::new(self.active_workers.clone(), done_tx.clone()),
            };

            let spawned = std::thread::Builder::new()
                .name(format!("cpu-pressure-{}", index))
                .spawn(move || worker.run());

            if let Err(e) = spawned {
                error!("Failed to spawn CPU worker {}: {}", index, e);
                drop(done_tx);
                self.drain(CpuRun { token, drained }).await;
                return Err(PressureError::SpawnFailed(e));
            }
        }
        drop(done_tx);

        self.requested_workers.store(threads, Ordering::Release);
        self.state.store(GeneratorState::Running);
        *run = Some(CpuRun { token, drained });

        info!(threads, "CPU load started");
        Ok(if restarted {
            Transition::Restarted
        } else {
            Transition::Started
        })
    }

    /// Stop all workers. Returns once they drained or the stop timeout passed.
    pub async fn stop(&self) -> Transition {
        let mut run = self.run.lock().await;

        match run.take() {
            Some(current) => {
                self.drain(current).await;
                info!("CPU load stopped");
                Transition::Stopped
            }
            None => {
                debug!("CPU load already stopped");
                Transition::AlreadyStopped
            }
        }
    }

    /// Cancel `run` and wait for its workers. Cancellation happens before the
    /// first await, so dropping this future still lets the workers exit.
    async fn drain(&self, mut run: CpuRun) {
        let _settle = StoppedOnDrop::stopping(&self.state);
        self.requested_workers.store(0, Ordering::Release);
        run.token.cancel();

        match tokio::time::timeout(self.stop_timeout, run.drained.recv()).await {
            Ok(_) => debug!("All CPU workers drained"),
            Err(_) => warn!(
                remaining = self.active_workers.load(Ordering::Acquire),
                "CPU workers did not drain within {:?}, detaching them",
                self.stop_timeout
            ),
        }
    }
}

impl Drop for CpuPressureGenerator {
    fn drop(&mut self) {
        if let Some(run) = self.run.get_mut().take() {
            run.token.cancel();
        }
    }
}

/// Tracks a live worker; released when the worker thread ends, even by panic
struct WorkerGuard {
    active: Arc<AtomicUsize>,
    _done: mpsc::Sender<()>,
}

impl WorkerGuard {
    fn new(active: Arc<AtomicUsize>, done: mpsc::Sender<()>) -> Self {
        active.fetch_add(1, Ordering::AcqRel);
        Self { active, _done: done }
    }
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}

struct CpuWorker {
    index: usize,
    token: CancellationToken,
    iterations: Arc<AtomicU64>,
    guard: WorkerGuard,
}

impl CpuWorker {
    fn run(self) {
        let CpuWorker {
            index,
            token,
            iterations,
            guard,
        } = self;

        let outcome = catch_unwind(AssertUnwindSafe(|| burn(index, &token, &iterations)));
        if outcome.is_err() {
            error!(worker = index, "CPU worker panicked");
        }

        drop(guard);
    }
}

fn burn(index: usize, token: &CancellationToken, iterations: &AtomicU64) {
    let mut x = index as f64 + 0.5;

    while !token.is_cancelled() {
        for _ in 0..BATCH_SIZE {
            x = std::hint::black_box(x.sin().mul_add(x.cos(), 1.0).abs() + 0.5);
        }
        iterations.fetch_add(1, Ordering::Relaxed);
    }
}
