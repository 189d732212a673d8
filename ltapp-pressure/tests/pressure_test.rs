//! Timing behaviour of the pressure generators

use ltapp_config::LoadConfig;
use ltapp_pressure::{CpuPressureGenerator, GeneratorState, LoadController, Transition};
use std::time::{Duration, Instant};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cpu_work_runs_and_stops() {
    let cpu = CpuPressureGenerator::new(16, Duration::from_secs(2));

    cpu.start(4).await.unwrap();
    let before = cpu.iterations();
    tokio::time::sleep(Duration::from_millis(200)).await;
    let during = cpu.iterations();
    assert!(during > before, "no work observed while running");

    cpu.stop().await;
    let stopped_at = cpu.iterations();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(cpu.iterations(), stopped_at, "work continued after stop");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cpu_stop_is_bounded() {
    for threads in [1, 8, 64] {
        let cpu = CpuPressureGenerator::new(64, Duration::from_secs(2));
        cpu.start(threads).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let started = Instant::now();
        assert_eq!(cpu.stop().await, Transition::Stopped);
        let elapsed = started.elapsed();

        assert!(elapsed < Duration::from_secs(2), "stop of {} workers took {:?}", threads, elapsed);
        assert_eq!(cpu.state(), GeneratorState::Stopped);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_controller_from_config() {
    let config = LoadConfig {
        cpu_threads: 3,
        memory_chunk_bytes: 256,
        memory_interval_ms: 10,
        ..Default::default()
    };
    let controller = LoadController::new(&config);

    controller.enable_cpu(None).await.unwrap();
    assert_eq!(controller.status().cpu.requested_workers, 3);
    assert_eq!(controller.status().cpu.state, GeneratorState::Running);

    controller.enable_memory().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let status = controller.status();
    assert_eq!(status.memory.state, GeneratorState::Running);
    assert!(status.memory.retained_bytes >= 256);

    controller.shutdown().await;
    assert_eq!(controller.status().cpu.active_workers, 0);
}
