//! Context types for dependency injection in REST API handlers
//!
//! Each endpoint group extracts only the context it needs; [`AppContext`]
//! bundles them as router state.

use axum::extract::FromRef;
use ltapp_messaging::{DeliveryMonitor, MessageService};
use ltapp_pressure::LoadController;
use std::sync::Arc;

use crate::process::ProcessSampler;

/// Context for the load control endpoints
#[derive(Clone)]
pub struct LoadContext {
    /// Facade over the CPU and memory generators
    pub controller: Arc<LoadController>,
    /// Process CPU/RSS sampler for the status endpoint
    pub sampler: Arc<ProcessSampler>,
}

impl LoadContext {
    pub fn new(controller: Arc<LoadController>) -> Self {
        Self {
            controller,
            sampler: Arc::new(ProcessSampler::new()),
        }
    }
}

/// Context for message and datapool endpoints
#[derive(Clone)]
pub struct MessagesContext {
    pub service: Arc<MessageService>,
    /// Inbound delivery liveness; `None` when the transport does not loop back
    pub delivery: Option<DeliveryMonitor>,
}

impl MessagesContext {
    pub fn new(service: Arc<MessageService>) -> Self {
        Self {
            service,
            delivery: None,
        }
    }

    /// Whether inbound messages still reach the buffer
    pub fn delivery_healthy(&self) -> bool {
        self.delivery.as_ref().is_none_or(DeliveryMonitor::is_running)
    }
}

/// Application context containing all dependencies
#[derive(Clone, FromRef)]
pub struct AppContext {
    pub load: LoadContext,
    pub messages: MessagesContext,
}

impl AppContext {
    pub fn new(controller: Arc<LoadController>, service: Arc<MessageService>) -> Self {
        Self {
            load: LoadContext::new(controller),
            messages: MessagesContext::new(service),
        }
    }

    /// Report inbound delivery liveness through `/ready`
    pub fn with_delivery(mut self, monitor: DeliveryMonitor) -> Self {
        self.messages.delivery = Some(monitor);
        self
    }
}
