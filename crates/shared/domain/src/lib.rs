//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user entity, the error taxonomy of the authentication core and the
//! password hashing capability.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{AuthError, HashingError, PasswordError, ProfileError, StoreError, StoreResult};
pub use password::{Argon2Hasher, PasswordHasher};
pub use user::{User, UserId, UserProfile, UserType};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockPasswordHasher;
