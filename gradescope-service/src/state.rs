//! Application state for the Gradescope service.

use std::sync::Arc;

use common::config::AppConfig;

use crate::gradescope::{Connector, GradescopeConnector};
use crate::session::{InMemorySessionStore, SessionStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub connector: Arc<dyn Connector>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Creates state backed by the real Gradescope client.
    pub fn new(config: AppConfig) -> Self {
        let connector = GradescopeConnector::new(config.gradescope_base_url.clone());
        Self::with_parts(config, Arc::new(connector), Arc::new(InMemorySessionStore::new()))
    }

    pub fn with_parts(
        config: AppConfig,
        connector: Arc<dyn Connector>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            connector,
            sessions,
        }
    }
}
