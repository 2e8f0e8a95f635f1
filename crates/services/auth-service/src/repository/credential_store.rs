//! Credential store contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use domain::{StoreError, StoreResult, User, UserId, UserType};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence of user records.
///
/// Implementations only persist; status and password rules belong to the
/// auth service. A missing record is always `StoreError::NotFound`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find user by login account
    async fn find_by_account(&self, account: &str) -> StoreResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> StoreResult<User>;

    /// Persist changes to an existing user
    async fn save(&self, user: &User) -> StoreResult<()>;
}

/// Map SeaORM errors onto the store contract
fn db_error(err: DbErr) -> StoreError {
    match err {
        DbErr::RecordNotFound(_) => StoreError::NotFound,
        other => StoreError::backend(other.to_string()),
    }
}

/// PostgreSQL-backed credential store
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new user record. Used by seeding, not by the auth flow.
    pub async fn insert(
        &self,
        account: String,
        password_hash: String,
        name: String,
        user_type: UserType,
    ) -> StoreResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            account: Set(account),
            password: Set(password_hash),
            name: Set(name),
            status: Set(true),
            user_type: Set(user_type.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(db_error)?;
        User::try_from(model)
    }
}

#[async_trait]
impl CredentialStore for UserStore {
    async fn find_by_account(&self, account: &str) -> StoreResult<User> {
        let model = UserEntity::find()
            .filter(user::Column::Account.eq(account))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or(StoreError::NotFound)?;

        User::try_from(model)
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or(StoreError::NotFound)?;

        User::try_from(model)
    }

    async fn save(&self, user: &User) -> StoreResult<()> {
        let model = UserEntity::find_by_id(user.id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or(StoreError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.account = Set(user.account.clone());
        active.password = Set(user.password_hash.clone());
        active.name = Set(user.name.clone());
        active.status = Set(user.status);
        active.user_type = Set(user.user_type.as_str().to_string());
        active.updated_at = Set(user.updated_at);

        active.update(&self.db).await.map_err(db_error)?;
        Ok(())
    }
}
