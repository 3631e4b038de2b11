use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use dashmap::DashMap;

use camlink_core::error::Result;
use camlink_core::protocol::{Decoded, Decoder, Event, CATALOG};

use crate::obs::RouterMetrics;

/// `event` label value for payloads outside the catalog.
pub const UNRECOGNIZED_LABEL: &str = "unknown";

/// Consumer of decoded events.
#[async_trait]
pub trait EventHandler: Send + Sync {
    fn name(&self) -> &'static str;
    async fn handle(&self, event: Arc<Event>) -> Result<()>;
}

/// Result of routing one raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Number of handlers that received the event (0 if none subscribed).
    Delivered(usize),
    /// Payload carried an `event_id` outside the catalog; dropped.
    Unrecognized(i128),
}

/// Routes events to handlers keyed by discriminator.
pub struct Dispatcher {
    decoder: Decoder,
    handlers: DashMap<u16, Vec<Arc<dyn EventHandler>>>,
    metrics: Arc<RouterMetrics>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Decoder::default(), Arc::new(RouterMetrics::default()))
    }
}

impl Dispatcher {
    pub fn new(decoder: Decoder, metrics: Arc<RouterMetrics>) -> Self {
        Self {
            decoder,
            handlers: DashMap::new(),
            metrics,
        }
    }

    /// Register `handler` for one discriminator.
    pub fn subscribe(&self, id: u16, handler: Arc<dyn EventHandler>) {
        self.handlers.entry(id).or_insert_with(Vec::new).push(handler);
    }

    /// Register `handler` for every catalog discriminator.
    pub fn subscribe_all(&self, handler: Arc<dyn EventHandler>) {
        for d in CATALOG {
            self.subscribe(d.id, Arc::clone(&handler));
        }
    }

    pub fn subscribed_ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self.handlers.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn metrics(&self) -> Arc<RouterMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Deliver `event` to every handler subscribed to its id.
    ///
    /// Handler failures are logged and counted; they do not stop delivery to
    /// the remaining handlers. Returns the number of handlers invoked.
    pub async fn dispatch(&self, event: Event) -> usize {
        let name = event.name();
        let handlers: Vec<Arc<dyn EventHandler>> = self
            .handlers
            .get(&event.id())
            .map(|h| h.value().clone())
            .unwrap_or_default();

        if handlers.is_empty() {
            tracing::debug!(event = name, "no handler subscribed");
            self.metrics
                .events
                .inc(&[("outcome", "unrouted"), ("event", name)]);
            return 0;
        }

        let started = Instant::now();
        let event = Arc::new(event);
        for h in &handlers {
            if let Err(e) = h.handle(Arc::clone(&event)).await {
                tracing::warn!(handler = h.name(), event = name, error = %e, "handler failed");
                self.metrics
                    .handler_errors
                    .inc(&[("handler", h.name()), ("event", name)]);
            }
        }
        self.metrics
            .dispatch_duration
            .observe(&[("event", name)], started.elapsed());
        self.metrics
            .events
            .inc(&[("outcome", "delivered"), ("event", name)]);
        handlers.len()
    }

    /// Decode `raw` and route the result.
    pub async fn dispatch_raw(&self, raw: &str) -> Result<Outcome> {
        match self.decoder.decode(raw) {
            Ok(Decoded::Event(ev)) => Ok(Outcome::Delivered(self.dispatch(ev).await)),
            Ok(Decoded::Unrecognized { event_id }) => {
                self.metrics
                    .events
                    .inc(&[("outcome", "unrecognized"), ("event", UNRECOGNIZED_LABEL)]);
                Ok(Outcome::Unrecognized(event_id))
            }
            Err(e) => {
                self.metrics
                    .decode_errors
                    .inc(&[("code", e.code().as_str())]);
                Err(e)
            }
        }
    }
}
