//! Auth Service Library
//!
//! This crate provides the authentication core: credential lookup, password
//! verification and password change over an injected credential store,
//! password hasher and audit log. It also owns the `users` schema and the
//! migrate/seed commands used by the combined binary.

pub mod audit;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use domain::{Argon2Hasher, PasswordHasher, UserType};

use crate::audit::TracingAudit;
use crate::config::AuthServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{AuthService, Authenticator};

/// Build the auth service against the configured database.
pub async fn connect(
    config: &AuthServiceConfig,
) -> Result<Arc<dyn AuthService>, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let store = Arc::new(UserStore::new(db.get_connection()));

    Ok(Arc::new(Authenticator::new(
        store,
        Arc::new(Argon2Hasher::new()),
        Arc::new(TracingAudit),
    )))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    action: MigrateAction,
    config: &AuthServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Create an active user with an Argon2 hash of `password`.
pub async fn seed(
    config: &AuthServiceConfig,
    account: &str,
    password: &str,
    name: &str,
    user_type: UserType,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let store = UserStore::new(db.get_connection());

    let password_hash = Argon2Hasher::new().hash(password)?;
    let user = store
        .insert(
            account.to_string(),
            password_hash,
            name.to_string(),
            user_type,
        )
        .await?;

    info!(user_id = user.id, account = %user.account, user_type = %user.user_type, "User seeded");
    Ok(())
}
