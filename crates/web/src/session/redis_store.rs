//! Redis-backed session store.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use tracing::{debug, warn};
use uuid::Uuid;

use common::{AppError, AppResult};

use super::{SessionData, SessionManager};

/// Key prefix for session entries
const SESSION_PREFIX: &str = "session:";

/// Sessions stored as JSON under `session:<id>` with a TTL.
pub struct RedisSessionStore {
    conn: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Connect to Redis.
    pub async fn connect(url: &str, ttl_seconds: u64) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn, ttl_seconds })
    }

    fn key(id: &str) -> String {
        format!("{}{}", SESSION_PREFIX, id)
    }
}

fn redis_error(op: &str, key: &str, e: RedisError) -> AppError {
    warn!("Redis {} error for key {}: {}", op, key, e);
    AppError::session(format!("Redis {} failed: {}", op, e))
}

#[async_trait]
impl SessionManager for RedisSessionStore {
    async fn create(&self, data: &SessionData) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();
        let key = Self::key(&id);
        let json = serde_json::to_string(data)
            .map_err(|e| AppError::internal(format!("Serialization error: {}", e)))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(&key, json, self.ttl_seconds)
            .await
            .map_err(|e| redis_error("set", &key, e))?;
        Ok(id)
    }

    async fn load(&self, id: &str) -> AppResult<Option<SessionData>> {
        let key = Self::key(id);
        let mut conn = self.conn.clone();
        let result: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| redis_error("get", &key, e))?;

        match result {
            Some(json) => match serde_json::from_str(&json) {
                Ok(data) => Ok(Some(data)),
                Err(e) => {
                    // Unreadable entries count as no session
                    warn!("Failed to deserialize session {}: {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn destroy(&self, id: &str) -> AppResult<()> {
        let key = Self::key(id);
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(&key)
            .await
            .map_err(|e| redis_error("delete", &key, e))?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: Option<String> = conn
            .get("health_check")
            .await
            .map_err(|e| redis_error("get", "health_check", e))?;
        Ok(())
    }
}
