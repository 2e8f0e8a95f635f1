//! In-memory credential store for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CredentialStore;
use domain::{StoreError, StoreResult, User, UserId, UserType};

/// Process-local store keyed by user ID.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new active user, assigning the next ID.
    pub async fn insert(
        &self,
        account: String,
        password_hash: String,
        name: String,
        user_type: UserType,
    ) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.account == account) {
            return Err(StoreError::backend(format!(
                "account '{}' already exists",
                account
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User::new(id, account, password_hash, name, user_type);
        users.insert(id, user.clone());
        Ok(user)
    }

    /// Remove a user outright, leaving any session that referenced it dangling.
    pub async fn remove(&self, id: UserId) -> Option<User> {
        self.users.write().await.remove(&id)
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_account(&self, account: &str) -> StoreResult<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.account == account)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<User> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn save(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}
