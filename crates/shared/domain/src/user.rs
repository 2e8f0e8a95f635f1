//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DASHBOARD_HOME_PATH, PANEL_HOME_PATH, USER_TYPE_DASHBOARD, USER_TYPE_PANEL,
};

/// User identifier as assigned by the store
pub type UserId = i64;

/// User type, decides where a user lands after login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Panel,
    Dashboard,
}

impl UserType {
    /// Home page this user type is redirected to after login
    pub fn home_path(&self) -> &'static str {
        match self {
            UserType::Panel => PANEL_HOME_PATH,
            UserType::Dashboard => DASHBOARD_HOME_PATH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Panel => USER_TYPE_PANEL,
            UserType::Dashboard => USER_TYPE_DASHBOARD,
        }
    }

    /// Parse a stored type tag. Unknown tags yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            USER_TYPE_PANEL => Some(UserType::Panel),
            USER_TYPE_DASHBOARD => Some(UserType::Dashboard),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub account: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    /// Whether the account may log in
    pub status: bool,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("account", &self.account)
            .field("password_hash", &"[REDACTED]")
            .field("name", &self.name)
            .field("status", &self.status)
            .field("user_type", &self.user_type)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl User {
    /// Create a new active user
    pub fn new(
        id: UserId,
        account: String,
        password_hash: String,
        name: String,
        user_type: UserType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            account,
            password_hash,
            name,
            status: true,
            user_type,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user may authenticate
    pub fn is_active(&self) -> bool {
        self.status
    }

    /// Replace the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

/// Profile data safe to hand to templates and clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub account: String,
    pub name: String,
    pub status: bool,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            account: user.account,
            name: user.name,
            status: user.status,
            user_type: user.user_type,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_round_trip_and_home() {
        assert_eq!(UserType::parse("panel"), Some(UserType::Panel));
        assert_eq!(UserType::parse("dashboard"), Some(UserType::Dashboard));
        assert_eq!(UserType::parse("admin"), None);

        assert_eq!(UserType::Panel.home_path(), "/panel/home");
        assert_eq!(UserType::Dashboard.home_path(), "/dashboard/home");
    }

    #[test]
    fn test_debug_redacts_hash() {
        let user = User::new(
            1,
            "alice".to_string(),
            "$argon2id$secret".to_string(),
            "Alice".to_string(),
            UserType::Panel,
        );

        let debug = format!("{:?}", user);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("$argon2id$secret"));
    }

    #[test]
    fn test_hash_never_serialized() {
        let user = User::new(
            1,
            "alice".to_string(),
            "$argon2id$secret".to_string(),
            "Alice".to_string(),
            UserType::Dashboard,
        );

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(json.contains("\"user_type\":\"dashboard\""));
    }
}
