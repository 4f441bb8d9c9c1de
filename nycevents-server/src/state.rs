use std::sync::Arc;

use nycevents_core::EventSource;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // Every request goes upstream; nothing is cached between requests
    source: Arc<dyn EventSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        AppState { source }
    }

    pub fn source(&self) -> &dyn EventSource {
        self.source.as_ref()
    }
}
