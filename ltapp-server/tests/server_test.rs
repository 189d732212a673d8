use axum::{body::Body, http::Request, http::StatusCode};
use ltapp_config::{LtappConfig, TransportKind};
use ltapp_pressure::GeneratorState;
use ltapp_server::Server;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tower::ServiceExt;

fn test_config() -> LtappConfig {
    let mut config = LtappConfig::default();
    config.load.cpu_threads = 2;
    config.load.memory_chunk_bytes = 1024;
    config.load.memory_interval_ms = 10;
    config
}

async fn http_get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        path
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_root_handler_lists_endpoints() {
    let server = Server::new(test_config()).unwrap();
    let app = server.build_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "running");
    assert_eq!(body["endpoints"]["rest_api"], "/api");
}

#[tokio::test]
async fn test_custom_prefix_is_applied() {
    let mut config = test_config();
    config.server.api_prefix = "/load".to_string();
    config.messaging.transport.kind = TransportKind::Sink;

    let app = Server::new(config).unwrap().build_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/load/messages/count").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/api/messages/count").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_graceful_shutdown_stops_generators() {
    let server = Server::new(test_config()).unwrap();
    let controller = server.services().controller.clone();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let serving = tokio::spawn(server.serve(listener, async move {
        let _ = shutdown_rx.await;
    }));

    let response = http_get(addr, "/health").await;
    assert!(response.starts_with("HTTP/1.1 200"));

    let response = http_get(addr, "/api/startCPULoad").await;
    assert!(response.contains("CPU load Enabled"));
    let response = http_get(addr, "/api/startLeak").await;
    assert!(response.contains("Memory Leak Enabled"));
    assert_eq!(controller.status().cpu.state, GeneratorState::Running);

    shutdown_tx.send(()).unwrap();
    serving.await.unwrap().unwrap();

    let status = controller.status();
    assert_eq!(status.cpu.state, GeneratorState::Stopped);
    assert_eq!(status.cpu.active_workers, 0);
    assert_eq!(status.memory.state, GeneratorState::Stopped);
}
