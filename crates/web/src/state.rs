//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::service::AuthService;

use crate::config::WebConfig;
use crate::session::SessionManager;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub sessions: Arc<dyn SessionManager>,
    pub config: WebConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        auth: Arc<dyn AuthService>,
        sessions: Arc<dyn SessionManager>,
        config: WebConfig,
    ) -> Self {
        Self {
            auth,
            sessions,
            config,
        }
    }
}
