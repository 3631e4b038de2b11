//! Shared application state for the router binary.

use std::sync::Arc;

use crate::config::RouterConfig;
use crate::dispatch::Dispatcher;
use crate::obs::RouterMetrics;
use crate::services::LogHandler;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<RouterConfig>,
    dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Build the dispatcher from config and register built-in handlers.
    pub fn new(cfg: RouterConfig) -> Self {
        let metrics = Arc::new(RouterMetrics::default());
        let dispatcher = Dispatcher::new(cfg.decoder.decoder(), metrics);

        dispatcher.subscribe_all(Arc::new(LogHandler::new()));

        Self {
            cfg: Arc::new(cfg),
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn cfg(&self) -> &RouterConfig {
        &self.cfg
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }
}
