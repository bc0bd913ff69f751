use std::sync::Arc;

use crate::{
    core::config::Config,
    dom::Document,
    events::Bus,
    subscribers::{Subscribe, SubscriberSet},
};

use super::gate::Gate;

/// Builder for constructing a Gate with optional subscribers.
pub struct GateBuilder {
    cfg: Config,
    doc: Arc<dyn Document>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl GateBuilder {
    /// Creates a new builder over the given page.
    pub fn new(cfg: Config, doc: Arc<dyn Document>) -> Self {
        Self {
            cfg,
            doc,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (session lifecycle, timeouts,
    /// contaminations) through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds and returns the Gate instance.
    ///
    /// This consumes the builder and initializes all runtime components:
    /// - Event bus for broadcasting
    /// - Subscriber workers
    /// - The bus listener feeding them
    ///
    /// Must be called within a Tokio runtime (workers are spawned here).
    pub fn build(self) -> Arc<Gate> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));

        let gate = Arc::new(Gate::new_internal(self.cfg, self.doc, bus, subs));
        gate.subscriber_listener();
        gate
    }
}
