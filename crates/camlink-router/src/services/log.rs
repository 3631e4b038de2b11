use std::sync::Arc;

use async_trait::async_trait;

use camlink_core::error::Result;
use camlink_core::protocol::{encode, Event};

use crate::dispatch::EventHandler;

/// Logs every event as `name -> json`. Subscribe it with `subscribe_all`.
#[derive(Debug, Default)]
pub struct LogHandler;

impl LogHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for LogHandler {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn handle(&self, event: Arc<Event>) -> Result<()> {
        let json = encode(&event)?;
        tracing::info!(id = event.id(), "{} -> {}", event.name(), json);
        Ok(())
    }
}
