//! In-process session store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::AppResult;

use super::{SessionData, SessionManager};

/// Sessions held in memory with the same TTL semantics as Redis.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, (SessionData, Instant)>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Number of sessions held, including expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionManager for MemorySessionStore {
    async fn create(&self, data: &SessionData) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        // Abandoned sessions are never loaded again; sweep them here
        sessions.retain(|_, (_, expires_at)| *expires_at > now);
        sessions.insert(id.clone(), (data.clone(), now + self.ttl));
        Ok(id)
    }

    async fn load(&self, id: &str) -> AppResult<Option<SessionData>> {
        let mut sessions = self.sessions.write().await;
        if let Some((data, expires_at)) = sessions.get(id) {
            if *expires_at > Instant::now() {
                return Ok(Some(data.clone()));
            }
            sessions.remove(id);
        }
        Ok(None)
    }

    async fn destroy(&self, id: &str) -> AppResult<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::UserType;

    fn data() -> SessionData {
        SessionData {
            user_id: 1,
            user_type: UserType::Panel,
            status: true,
            name: "Alice".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_load_destroy() {
        let store = MemorySessionStore::new(60);
        let session = data();
        let id = store.create(&session).await.unwrap();

        assert_eq!(store.load(&id).await.unwrap(), Some(session));

        store.destroy(&id).await.unwrap();
        assert_eq!(store.load(&id).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = MemorySessionStore::new(60);
        let a = store.create(&data()).await.unwrap();
        let b = store.create(&data()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let store = MemorySessionStore::new(0);
        let id = store.create(&data()).await.unwrap();

        assert_eq!(store.load(&id).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_sweeps_abandoned_sessions() {
        let store = MemorySessionStore::new(0);
        store.create(&data()).await.unwrap();
        store.create(&data()).await.unwrap();
        store.create(&data()).await.unwrap();

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_keeps_live_sessions() {
        let store = MemorySessionStore::new(60);
        let first = store.create(&data()).await.unwrap();
        store.create(&data()).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store.load(&first).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let store = MemorySessionStore::new(60);
        assert_eq!(store.load("missing").await.unwrap(), None);
        store.destroy("missing").await.unwrap();
    }
}
