//! Password hashing - one-way hash and constant-time verification.
//!
//! The auth service only talks to the [`PasswordHasher`] trait, so the
//! algorithm can be swapped (or mocked) without touching business rules.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2,
};

use crate::error::HashingError;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One-way password hashing capability.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text password into a self-describing hash string.
    fn hash(&self, plain_text: &str) -> Result<String, HashingError>;

    /// Check a plain text password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch and `Err` only when the hash itself
    /// is unusable or the primitive fails.
    fn verify(&self, hash: &str, plain_text: &str) -> Result<bool, HashingError>;
}

/// Argon2id hasher with a fresh random salt per hash.
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher").finish_non_exhaustive()
    }
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| HashingError::new(format!("hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, hash: &str, plain_text: &str) -> Result<bool, HashingError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| HashingError::new(format!("invalid hash format: {}", e)))?;

        // Digest comparison inside verify_password is constant time
        match self.argon2.verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashingError::new(format!("verify failed: {}", e))),
        }
    }
}
