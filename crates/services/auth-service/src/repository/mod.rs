//! Repository layer for credential storage.

pub mod entities;
mod credential_store;
mod memory_store;

pub use credential_store::{CredentialStore, UserStore};
pub use memory_store::MemoryStore;

#[cfg(any(test, feature = "test-utils"))]
pub use credential_store::MockCredentialStore;
