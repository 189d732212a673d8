//! Outbound transports and inbound delivery
//!
//! The service only sees [`MessageTransport`]. The loopback transport publishes
//! onto a bounded in-process channel that [`InboundDelivery`] drains back into
//! [`MessageService::deliver`], which stands in for an external broker's
//! produce-then-listen round trip.

use crate::errors::TransportError;
use crate::payload::MessagePayload;
use crate::service::MessageService;
use async_trait::async_trait;
use ltapp_config::{TransportConfig, TransportKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Opaque channel accepting payloads for delivery
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Publish a payload on `topic`
    async fn publish(&self, topic: &str, payload: MessagePayload) -> Result<(), TransportError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Transport that loops sends back into the local buffer
pub struct LoopbackTransport {
    sender: mpsc::Sender<MessagePayload>,
}

impl LoopbackTransport {
    /// Create the transport and the receiving end for [`InboundDelivery`]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<MessagePayload>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl MessageTransport for LoopbackTransport {
    async fn publish(&self, topic: &str, payload: MessagePayload) -> Result<(), TransportError> {
        trace!(topic, "Publishing on loopback channel");
        self.sender
            .send(payload)
            .await
            .map_err(|_| TransportError::Closed)
    }

    fn name(&self) -> &'static str {
        "loopback"
    }
}

/// Transport that accepts and drops every payload
#[derive(Debug, Default)]
pub struct SinkTransport;

#[async_trait]
impl MessageTransport for SinkTransport {
    async fn publish(&self, topic: &str, _payload: MessagePayload) -> Result<(), TransportError> {
        trace!(topic, "Dropping payload on sink transport");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sink"
    }
}

/// Build the configured transport, with the receiver to drain when it loops back
pub fn build_transport(
    config: &TransportConfig,
) -> (Arc<dyn MessageTransport>, Option<mpsc::Receiver<MessagePayload>>) {
    match config.kind {
        TransportKind::Loopback => {
            let (transport, receiver) = LoopbackTransport::channel(config.channel_capacity);
            (Arc::new(transport), Some(receiver))
        }
        TransportKind::Sink => (Arc::new(SinkTransport), None),
    }
}

/// Background task feeding a receiver into the service's inbound entry point
pub struct InboundDelivery {
    token: CancellationToken,
    handle: JoinHandle<()>,
    running: Arc<AtomicBool>,
}

/// Cloneable view of whether an [`InboundDelivery`] task is still draining
#[derive(Debug, Clone)]
pub struct DeliveryMonitor {
    running: Arc<AtomicBool>,
}

impl DeliveryMonitor {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Clears the running flag when the delivery task ends, including by panic
struct RunningFlag(Arc<AtomicBool>);

impl Drop for RunningFlag {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl InboundDelivery {
    pub fn spawn(mut receiver: mpsc::Receiver<MessagePayload>, service: Arc<MessageService>) -> Self {
        let token = CancellationToken::new();
        let child = token.clone();
        let running = Arc::new(AtomicBool::new(true));
        let flag = RunningFlag(running.clone());

        let handle = tokio::spawn(async move {
            let _flag = flag;
            info!("Inbound delivery started");
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    received = receiver.recv() => match received {
                        Some(payload) => service.deliver(payload),
                        None => {
                            debug!("Inbound channel closed");
                            break;
                        }
                    },
                }
            }
            info!("Inbound delivery stopped");
        });

        Self {
            token,
            handle,
            running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Liveness handle that outlives this task's owner
    pub fn monitor(&self) -> DeliveryMonitor {
        DeliveryMonitor {
            running: self.running.clone(),
        }
    }

    /// Cancel the task and wait up to `timeout` for it to finish
    pub async fn shutdown(self, timeout: Duration) {
        self.token.cancel();
        match tokio::time::timeout(timeout, self.handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Inbound delivery task failed: {}", e),
            Err(_) => warn!("Inbound delivery did not stop within {:?}", timeout),
        }
    }
}
