//! Memory growth generator
//!
//! A single async worker allocates a chunk, hands it to a [`RetentionPool`] and
//! sleeps. Retained chunks are never released; stopping only halts growth.

use crate::state::{AtomicState, GeneratorState, StoppedOnDrop, Transition};
use ltapp_config::LoadConfig;
use once_cell::sync::Lazy;
use parking_lot::Mutex as SyncMutex;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Byte pattern written into every chunk so its pages are committed
const FILL_BYTE: u8 = 0xA5;

/// Default wait in `stop` for the worker task to observe cancellation
const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(2);

static GLOBAL_POOL: Lazy<Arc<RetentionPool>> = Lazy::new(|| Arc::new(RetentionPool::new()));

/// Holds allocations for the rest of the process lifetime
#[derive(Debug, Default)]
pub struct RetentionPool {
    chunks: SyncMutex<Vec<Box<[u8]>>>,
    retained_chunks: AtomicUsize,
    retained_bytes: AtomicUsize,
}

impl RetentionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide pool
    pub fn global() -> Arc<RetentionPool> {
        GLOBAL_POOL.clone()
    }

    pub fn retain(&self, chunk: Box<[u8]>) {
        let len = chunk.len();
        self.chunks.lock().push(chunk);
        self.retained_chunks.fetch_add(1, Ordering::Relaxed);
        self.retained_bytes.fetch_add(len, Ordering::Relaxed);
    }

    pub fn retained_chunks(&self) -> usize {
        self.retained_chunks.load(Ordering::Relaxed)
    }

    pub fn retained_bytes(&self) -> usize {
        self.retained_bytes.load(Ordering::Relaxed)
    }
}

/// Snapshot of the memory generator
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStatus {
    pub state: GeneratorState,
    pub retained_chunks: usize,
    pub retained_bytes: usize,
}

struct MemoryRun {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Background task that keeps growing the retention pool while running
pub struct MemoryPressureGenerator {
    pool: Arc<RetentionPool>,
    chunk_bytes: usize,
    interval: Duration,
    stop_timeout: Duration,
    state: AtomicState,
    run: Mutex<Option<MemoryRun>>,
}

impl MemoryPressureGenerator {
    pub fn new(chunk_bytes: usize, interval: Duration) -> Self {
        Self::with_pool(RetentionPool::global(), chunk_bytes, interval)
    }

    /// Generator retaining into a caller-provided pool
    pub fn with_pool(pool: Arc<RetentionPool>, chunk_bytes: usize, interval: Duration) -> Self {
        Self {
            pool,
            chunk_bytes,
            interval,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
            state: AtomicState::new(GeneratorState::Stopped),
            run: Mutex::new(None),
        }
    }

    pub fn from_config(config: &LoadConfig) -> Self {
        Self::new(config.memory_chunk_bytes, config.memory_interval())
            .with_stop_timeout(config.memory_stop_timeout())
    }

    /// Bound on how long `stop` waits for the worker to exit
    pub fn with_stop_timeout(mut self, stop_timeout: Duration) -> Self {
        self.stop_timeout = stop_timeout;
        self
    }

    pub fn state(&self) -> GeneratorState {
        self.state.load()
    }

    pub fn is_running(&self) -> bool {
        self.state() == GeneratorState::Running
    }

    pub fn pool(&self) -> &Arc<RetentionPool> {
        &self.pool
    }

    pub fn status(&self) -> MemoryStatus {
        MemoryStatus {
            state: self.state(),
            retained_chunks: self.pool.retained_chunks(),
            retained_bytes: self.pool.retained_bytes(),
        }
    }

    /// Start the growth worker. A second call while running spawns nothing.
    pub async fn start(&self) -> Transition {
        let mut run = self.run.lock().await;

        if let Some(current) = run.as_ref() {
            if !current.handle.is_finished() {
                debug!("Memory growth already running");
                return Transition::AlreadyRunning;
            }
            // The worker ended on its own; reap it before starting a new one
            if let Some(finished) = run.take() {
                if let Err(e) = finished.handle.await {
                    error!("Memory growth worker failed: {}", e);
                }
            }
        }

        let token = CancellationToken::new();
        let handle = tokio::spawn(grow(
            self.pool.clone(),
            self.chunk_bytes,
            self.interval,
            token.clone(),
        ));

        *run = Some(MemoryRun { token, handle });
        self.state.store(GeneratorState::Running);

        info!(
            chunk_bytes = self.chunk_bytes,
            interval_ms = self.interval.as_millis() as u64,
            "Memory growth started"
        );
        Transition::Started
    }

    /// Halt growth. Memory already retained stays allocated.
    pub async fn stop(&self) -> Transition {
        let mut run = self.run.lock().await;

        let Some(current) = run.take() else {
            debug!("Memory growth already stopped");
            return Transition::AlreadyStopped;
        };

        let settle = StoppedOnDrop::stopping(&self.state);
        current.token.cancel();

        match tokio::time::timeout(self.stop_timeout, current.handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Memory growth worker failed: {}", e),
            Err(_) => warn!(
                "Memory growth worker did not stop within {:?}, detaching it",
                self.stop_timeout
            ),
        }

        drop(settle);
        info!(
            retained_bytes = self.pool.retained_bytes(),
            "Memory growth stopped"
        );
        Transition::Stopped
    }
}

impl Drop for MemoryPressureGenerator {
    fn drop(&mut self) {
        if let Some(run) = self.run.get_mut().take() {
            run.token.cancel();
        }
    }
}

async fn grow(pool: Arc<RetentionPool>, chunk_bytes: usize, interval: Duration, token: CancellationToken) {
    while !token.is_cancelled() {
        pool.retain(vec![FILL_BYTE; chunk_bytes].into_boxed_slice());

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(pool: Arc<RetentionPool>) -> MemoryPressureGenerator {
        MemoryPressureGenerator::with_pool(pool, 1024, Duration::from_millis(20))
    }

    #[test]
    fn test_pool_accounting() {
        let pool = RetentionPool::new();
        pool.retain(vec![FILL_BYTE; 16].into_boxed_slice());
        pool.retain(vec![FILL_BYTE; 32].into_boxed_slice());

        assert_eq!(pool.retained_chunks(), 2);
        assert_eq!(pool.retained_bytes(), 48);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_idempotent() {
        let pool = Arc::new(RetentionPool::new());
        let memory = generator(pool.clone());

        assert_eq!(memory.start().await, Transition::Started);
        assert_eq!(memory.start().await, Transition::AlreadyRunning);
        assert!(memory.is_running());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(memory.stop().await, Transition::Stopped);

        // One worker at 20ms spacing over 200ms; a second worker would double this
        let chunks = pool.retained_chunks();
        assert!((9..=12).contains(&chunks), "unexpected chunk count {}", chunks);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_keeps_retained_memory() {
        let pool = Arc::new(RetentionPool::new());
        let memory = generator(pool.clone());

        memory.start().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        memory.stop().await;

        let retained = pool.retained_bytes();
        assert!(retained > 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(pool.retained_bytes(), retained);
        assert_eq!(memory.status().state, GeneratorState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_when_stopped_is_noop() {
        let memory = generator(Arc::new(RetentionPool::new()));
        assert_eq!(memory.stop().await, Transition::AlreadyStopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop_resumes_growth() {
        let pool = Arc::new(RetentionPool::new());
        let memory = generator(pool.clone());

        memory.start().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        memory.stop().await;
        let after_first = pool.retained_chunks();

        assert_eq!(memory.start().await, Transition::Started);
        tokio::time::sleep(Duration::from_millis(50)).await;
        memory.stop().await;

        assert!(pool.retained_chunks() > after_first);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_stop_settles_state() {
        let pool = Arc::new(RetentionPool::new());
        let memory = generator(pool.clone());
        memory.start().await;

        // Abandoned before the worker task gets to observe cancellation
        let _ = tokio::time::timeout(Duration::ZERO, memory.stop()).await;
        assert_eq!(memory.state(), GeneratorState::Stopped);

        tokio::time::sleep(Duration::from_millis(100)).await;
        let retained = pool.retained_chunks();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(pool.retained_chunks(), retained);

        assert_eq!(memory.stop().await, Transition::AlreadyStopped);
        assert_eq!(memory.start().await, Transition::Started);
        memory.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_timeout_from_config() {
        let config = LoadConfig {
            memory_stop_timeout_ms: 250,
            ..LoadConfig::default()
        };
        let memory = MemoryPressureGenerator::from_config(&config);
        assert_eq!(memory.stop_timeout, Duration::from_millis(250));
    }
}
