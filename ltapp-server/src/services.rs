//! Service container holding the long-lived components

use ltapp_config::LtappConfig;
use ltapp_messaging::{build_transport, InboundDelivery, MessageBuffer, MessageService, MessageTransport};
use ltapp_pressure::LoadController;
use ltapp_rest_api::AppContext;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Container for all services
///
/// Must be created inside a Tokio runtime: a loopback transport spawns its
/// delivery task immediately.
pub struct ServiceContainer {
    pub controller: Arc<LoadController>,
    pub buffer: Arc<MessageBuffer>,
    pub messages: Arc<MessageService>,
    delivery: Option<InboundDelivery>,
}

impl ServiceContainer {
    pub fn new(config: &LtappConfig) -> Self {
        let controller = Arc::new(LoadController::new(&config.load));
        let buffer = Arc::new(MessageBuffer::new());

        let (transport, receiver) = build_transport(&config.messaging.transport);
        info!(
            transport = transport.name(),
            topic = %config.messaging.topic,
            "Message transport ready"
        );

        let messages = Arc::new(MessageService::new(
            buffer.clone(),
            transport,
            config.messaging.clone(),
        ));
        let delivery = receiver.map(|receiver| InboundDelivery::spawn(receiver, messages.clone()));

        Self {
            controller,
            buffer,
            messages,
            delivery,
        }
    }

    /// Router state for the REST API
    pub fn rest_context(&self) -> AppContext {
        let context = AppContext::new(self.controller.clone(), self.messages.clone());
        match &self.delivery {
            Some(delivery) => context.with_delivery(delivery.monitor()),
            None => context,
        }
    }

    /// Whether inbound delivery is draining the loopback channel
    pub fn delivery_running(&self) -> bool {
        self.delivery.as_ref().is_some_and(InboundDelivery::is_running)
    }

    /// Disable both generators and stop inbound delivery
    pub async fn shutdown(&mut self, timeout: Duration) {
        info!("Shutting down services");
        self.controller.shutdown().await;

        if let Some(delivery) = self.delivery.take() {
            delivery.shutdown(timeout).await;
        }
        info!("Services stopped");
    }
}
