//! Domain-level errors.
//!
//! Each core operation has its own closed error enum so callers can match
//! every outcome exhaustively. Collaborator failures (store, hasher) have
//! their own types and are translated by the auth service, never surfaced
//! directly.

use thiserror::Error;

use crate::constants::MIN_PASSWORD_LENGTH;

/// Failures reported by a credential store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record matches the lookup key
    #[error("record not found")]
    NotFound,

    /// The backing storage failed (connection, query, constraint...)
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend(msg.into())
    }
}

/// The hashing primitive failed, or a stored hash could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("password hashing failed: {0}")]
pub struct HashingError(pub String);

impl HashingError {
    pub fn new(msg: impl Into<String>) -> Self {
        HashingError(msg.into())
    }
}

/// Outcomes of a failed `authenticate` call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,

    #[error("user is not active")]
    UserInactive,

    #[error("invalid credentials")]
    InvalidCredentials,

    /// Store or hasher failure during authentication
    #[error("an error occurred during authentication")]
    Generic,
}

impl AuthError {
    /// Business rejections are expected; only `Generic` signals infrastructure trouble.
    pub fn is_expected(&self) -> bool {
        !matches!(self, AuthError::Generic)
    }
}

/// Outcomes of a failed `get_user_profile` call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("user not found")]
    UserNotFound,

    #[error("failed to load profile")]
    Generic,
}

impl ProfileError {
    pub fn is_expected(&self) -> bool {
        matches!(self, ProfileError::UserNotFound)
    }
}

/// Outcomes of a failed `update_password` call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("user not found")]
    UserNotFound,

    #[error("current password is incorrect")]
    CurrentPasswordIncorrect,

    #[error("new password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    TooShort,

    #[error("new password cannot be the same as the current password")]
    SameAsOld,

    #[error("failed to hash the new password")]
    HashingFailed,

    #[error("failed to save the new password")]
    DatabaseUpdateFailed,

    /// Store failure while loading the user
    #[error("an error occurred while updating the password")]
    Generic,
}

impl PasswordError {
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            PasswordError::UserNotFound
                | PasswordError::CurrentPasswordIncorrect
                | PasswordError::TooShort
                | PasswordError::SameAsOld
        )
    }
}

/// Result type alias for credential store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rejections_are_expected() {
        assert!(AuthError::InvalidCredentials.is_expected());
        assert!(AuthError::UserInactive.is_expected());
        assert!(!AuthError::Generic.is_expected());

        assert!(PasswordError::TooShort.is_expected());
        assert!(PasswordError::SameAsOld.is_expected());
        assert!(!PasswordError::HashingFailed.is_expected());
        assert!(!PasswordError::DatabaseUpdateFailed.is_expected());

        assert!(ProfileError::UserNotFound.is_expected());
        assert!(!ProfileError::Generic.is_expected());
    }

    #[test]
    fn test_too_short_message_names_the_minimum() {
        assert_eq!(
            PasswordError::TooShort.to_string(),
            "new password must be at least 6 characters"
        );
    }
}
