//! Server-side sessions.
//!
//! The browser only holds a random session ID in an HTTP-only cookie; the
//! session data lives in a [`SessionManager`] (Redis in production, memory
//! for tests and local runs).

mod memory_store;
mod redis_store;

use std::sync::Arc;

use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use common::{AppResult, SessionBackend, SessionConfig};
use domain::{User, UserId, UserType};

#[cfg(test)]
use mockall::automock;

pub use memory_store::MemorySessionStore;
pub use redis_store::RedisSessionStore;

/// What the server remembers about a logged-in client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: UserId,
    pub user_type: UserType,
    pub status: bool,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            user_type: user.user_type,
            status: user.status,
            name: user.name.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Session storage keyed by an opaque session ID.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// Store a new session and return its ID
    async fn create(&self, data: &SessionData) -> AppResult<String>;

    /// Load a live session. Expired and unknown IDs yield `None`.
    async fn load(&self, id: &str) -> AppResult<Option<SessionData>>;

    /// Remove a session. Unknown IDs are not an error.
    async fn destroy(&self, id: &str) -> AppResult<()>;

    /// Check the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Open the session store selected by the configuration.
pub async fn connect(
    config: &SessionConfig,
) -> Result<Arc<dyn SessionManager>, redis::RedisError> {
    match config.backend {
        SessionBackend::Redis => {
            let store = RedisSessionStore::connect(&config.redis_url, config.ttl_seconds).await?;
            info!("Using Redis session store");
            Ok(Arc::new(store))
        }
        SessionBackend::Memory => {
            info!("Using in-memory session store");
            Ok(Arc::new(MemorySessionStore::new(config.ttl_seconds)))
        }
    }
}

/// Cookie handing the session ID to the browser
pub fn session_cookie(config: &SessionConfig, id: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), id))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that clears the session ID
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), "")).path("/").build()
}
