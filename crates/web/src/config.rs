//! Web server configuration.

use common::{ServerConfig, SessionConfig};

/// Web server configuration.
#[derive(Debug, Clone, Default)]
pub struct WebConfig {
    /// Listen address
    pub server: ServerConfig,
    /// Session store and cookie settings
    pub session: SessionConfig,
}

impl WebConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            session: SessionConfig::from_env(),
        }
    }
}
