//! Authentication service - login, profile lookup and password change.
//!
//! Stateless: every call talks to the injected store and hasher and reports
//! its outcome to the injected audit log. Session lifecycle stays with the
//! caller; a successful `authenticate` or `update_password` is the caller's
//! signal to create or destroy the session.

use async_trait::async_trait;
use std::sync::Arc;

use domain::{
    AuthError, PasswordError, PasswordHasher, ProfileError, StoreError, User, UserId,
    MIN_PASSWORD_LENGTH,
};

use crate::audit::{AuditAction, AuditEvent, AuditLog};
use crate::repository::CredentialStore;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check account and password, returning the user on success
    async fn authenticate(&self, account: &str, password: &str) -> Result<User, AuthError>;

    /// Load the user behind a session. The caller vouches for the ID.
    async fn get_user_profile(&self, id: UserId) -> Result<User, ProfileError>;

    /// Replace the password after re-checking the current one
    async fn update_password(
        &self,
        id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), PasswordError>;
}

/// Why a lookup by ID did not produce a user
enum Lookup {
    NotFound,
    Failed,
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    audit: Arc<dyn AuditLog>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            store,
            hasher,
            audit,
        }
    }

    async fn user_by_id(&self, id: UserId, action: AuditAction) -> Result<User, Lookup> {
        match self.store.find_by_id(id).await {
            Ok(user) => Ok(user),
            Err(StoreError::NotFound) => {
                self.audit
                    .record(&AuditEvent::rejected(action, "user not found").user(id));
                Err(Lookup::NotFound)
            }
            Err(e) => {
                self.audit.record(&AuditEvent::failed(action, &e).user(id));
                Err(Lookup::Failed)
            }
        }
    }

    fn reject_password_change(&self, id: UserId, err: PasswordError) -> PasswordError {
        self.audit
            .record(&AuditEvent::rejected(AuditAction::PasswordChange, &err).user(id));
        err
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, account: &str, password: &str) -> Result<User, AuthError> {
        let action = AuditAction::Authenticate;

        let user = match self.store.find_by_account(account).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                self.audit
                    .record(&AuditEvent::rejected(action, AuthError::UserNotFound).account(account));
                return Err(AuthError::UserNotFound);
            }
            Err(e) => {
                self.audit
                    .record(&AuditEvent::failed(action, &e).account(account));
                return Err(AuthError::Generic);
            }
        };

        // Inactive accounts are refused before the password is looked at
        if !user.is_active() {
            self.audit.record(
                &AuditEvent::rejected(action, AuthError::UserInactive)
                    .account(account)
                    .user(user.id),
            );
            return Err(AuthError::UserInactive);
        }

        match self.hasher.verify(&user.password_hash, password) {
            Ok(true) => {}
            Ok(false) => {
                self.audit.record(
                    &AuditEvent::rejected(action, AuthError::InvalidCredentials)
                        .account(account)
                        .user(user.id),
                );
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                self.audit.record(
                    &AuditEvent::failed(action, &e)
                        .account(account)
                        .user(user.id),
                );
                return Err(AuthError::Generic);
            }
        }

        self.audit
            .record(&AuditEvent::succeeded(action).account(account).user(user.id));
        Ok(user)
    }

    async fn get_user_profile(&self, id: UserId) -> Result<User, ProfileError> {
        self.user_by_id(id, AuditAction::ProfileLookup)
            .await
            .map_err(|lookup| match lookup {
                Lookup::NotFound => ProfileError::UserNotFound,
                Lookup::Failed => ProfileError::Generic,
            })
    }

    async fn update_password(
        &self,
        id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), PasswordError> {
        let action = AuditAction::PasswordChange;

        let mut user = self
            .user_by_id(id, action)
            .await
            .map_err(|lookup| match lookup {
                Lookup::NotFound => PasswordError::UserNotFound,
                Lookup::Failed => PasswordError::Generic,
            })?;

        match self.hasher.verify(&user.password_hash, current_password) {
            Ok(true) => {}
            Ok(false) => {
                return Err(self.reject_password_change(id, PasswordError::CurrentPasswordIncorrect))
            }
            Err(e) => {
                self.audit.record(&AuditEvent::failed(action, &e).user(id));
                return Err(PasswordError::HashingFailed);
            }
        }

        // Length first, then equality
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(self.reject_password_change(id, PasswordError::TooShort));
        }

        if new_password == current_password {
            return Err(self.reject_password_change(id, PasswordError::SameAsOld));
        }

        let new_hash = self.hasher.hash(new_password).map_err(|e| {
            self.audit.record(&AuditEvent::failed(action, &e).user(id));
            PasswordError::HashingFailed
        })?;

        user.set_password_hash(new_hash);
        self.store.save(&user).await.map_err(|e| {
            self.audit.record(&AuditEvent::failed(action, &e).user(id));
            PasswordError::DatabaseUpdateFailed
        })?;

        self.audit
            .record(&AuditEvent::succeeded(action).account(&user.account).user(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use domain::{HashingError, MockPasswordHasher, UserType};
    use mockall::predicate::eq;

    use crate::audit::AuditOutcome;
    use crate::repository::MockCredentialStore;

    /// Audit sink that keeps events for assertions
    #[derive(Default)]
    struct RecordingAudit {
        events: Mutex<Vec<AuditEvent>>,
    }

    impl RecordingAudit {
        fn events(&self) -> Vec<AuditEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl AuditLog for RecordingAudit {
        fn record(&self, event: &AuditEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn create_test_user(id: UserId, status: bool) -> User {
        let mut user = User::new(
            id,
            "alice".to_string(),
            "stored-hash".to_string(),
            "Alice".to_string(),
            UserType::Panel,
        );
        user.status = status;
        user
    }

    fn service(
        store: MockCredentialStore,
        hasher: MockPasswordHasher,
    ) -> (Authenticator, Arc<RecordingAudit>) {
        let audit = Arc::new(RecordingAudit::default());
        let service = Authenticator::new(Arc::new(store), Arc::new(hasher), audit.clone());
        (service, audit)
    }

    #[tokio::test]
    async fn test_authenticate_success_does_not_save() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_account()
            .with(eq("alice"))
            .returning(|_| Ok(create_test_user(1, true)));
        store.expect_save().never();

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .with(eq("stored-hash"), eq("secret1"))
            .returning(|_, _| Ok(true));

        let (service, audit) = service(store, hasher);
        let user = service.authenticate("alice", "secret1").await.unwrap();

        assert_eq!(user.id, 1);
        let events = audit.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, AuditOutcome::Succeeded);
        assert_eq!(events[0].user_id, Some(1));
    }

    #[tokio::test]
    async fn test_authenticate_inactive_skips_password_check() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_account()
            .returning(|_| Ok(create_test_user(2, false)));

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().never();

        let (service, audit) = service(store, hasher);
        let result = service.authenticate("alice", "secret1").await;

        assert_eq!(result.unwrap_err(), AuthError::UserInactive);
        assert!(matches!(
            audit.events()[0].outcome,
            AuditOutcome::Rejected { .. }
        ));
    }

    #[tokio::test]
    async fn test_authenticate_store_failure_is_generic() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_account()
            .returning(|_| Err(StoreError::backend("connection refused")));

        let (service, audit) = service(store, MockPasswordHasher::new());
        let result = service.authenticate("alice", "secret1").await;

        assert_eq!(result.unwrap_err(), AuthError::Generic);
        assert!(matches!(
            audit.events()[0].outcome,
            AuditOutcome::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn test_authenticate_corrupt_hash_is_generic() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_account()
            .returning(|_| Ok(create_test_user(1, true)));

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .returning(|_, _| Err(HashingError::new("invalid hash format")));

        let (service, _) = service(store, hasher);
        let result = service.authenticate("alice", "secret1").await;

        assert_eq!(result.unwrap_err(), AuthError::Generic);
    }

    #[tokio::test]
    async fn test_profile_not_found_and_failure() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_id()
            .with(eq(9))
            .returning(|_| Err(StoreError::NotFound));
        store
            .expect_find_by_id()
            .with(eq(10))
            .returning(|_| Err(StoreError::backend("timeout")));

        let (service, _) = service(store, MockPasswordHasher::new());

        assert_eq!(
            service.get_user_profile(9).await.unwrap_err(),
            ProfileError::UserNotFound
        );
        assert_eq!(
            service.get_user_profile(10).await.unwrap_err(),
            ProfileError::Generic
        );
    }

    #[tokio::test]
    async fn test_update_password_lookup_failure_is_generic() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_id()
            .returning(|_| Err(StoreError::backend("timeout")));

        let (service, _) = service(store, MockPasswordHasher::new());
        let result = service.update_password(1, "secret1", "newpass1").await;

        assert_eq!(result.unwrap_err(), PasswordError::Generic);
    }

    #[tokio::test]
    async fn test_update_password_checks_length_before_equality() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_id()
            .returning(|id| Ok(create_test_user(id, true)));
        store.expect_save().never();

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(true));
        hasher.expect_hash().never();

        let (service, _) = service(store, hasher);

        // "abc" is both too short and equal to the current password
        let result = service.update_password(1, "abc", "abc").await;
        assert_eq!(result.unwrap_err(), PasswordError::TooShort);
    }

    #[tokio::test]
    async fn test_update_password_hashing_failure() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_id()
            .returning(|id| Ok(create_test_user(id, true)));
        store.expect_save().never();

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(true));
        hasher
            .expect_hash()
            .returning(|_| Err(HashingError::new("out of memory")));

        let (service, audit) = service(store, hasher);
        let result = service.update_password(1, "secret1", "newpass1").await;

        assert_eq!(result.unwrap_err(), PasswordError::HashingFailed);
        assert!(matches!(
            audit.events().last().unwrap().outcome,
            AuditOutcome::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_password_save_failure() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_id()
            .returning(|id| Ok(create_test_user(id, true)));
        store
            .expect_save()
            .times(1)
            .returning(|_| Err(StoreError::backend("deadlock detected")));

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(true));
        hasher
            .expect_hash()
            .with(eq("newpass1"))
            .returning(|_| Ok("new-hash".to_string()));

        let (service, _) = service(store, hasher);
        let result = service.update_password(1, "secret1", "newpass1").await;

        assert_eq!(result.unwrap_err(), PasswordError::DatabaseUpdateFailed);
    }

    #[tokio::test]
    async fn test_update_password_saves_new_hash() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_id()
            .returning(|id| Ok(create_test_user(id, true)));
        store
            .expect_save()
            .withf(|user: &User| user.id == 1 && user.password_hash == "new-hash")
            .times(1)
            .returning(|_| Ok(()));

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(true));
        hasher
            .expect_hash()
            .returning(|_| Ok("new-hash".to_string()));

        let (service, audit) = service(store, hasher);
        service
            .update_password(1, "secret1", "newpass1")
            .await
            .unwrap();

        let last = audit.events().last().unwrap().clone();
        assert_eq!(last.action, AuditAction::PasswordChange);
        assert_eq!(last.outcome, AuditOutcome::Succeeded);
    }
}
