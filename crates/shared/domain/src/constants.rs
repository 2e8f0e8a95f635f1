//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Types
// =============================================================================

/// Users routed to the administration panel after login
pub const USER_TYPE_PANEL: &str = "panel";

/// Users routed to the customer dashboard after login
pub const USER_TYPE_DASHBOARD: &str = "dashboard";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement (bytes)
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum account identifier length accepted by the login form
pub const MIN_ACCOUNT_LENGTH: usize = 3;

// =============================================================================
// Routing
// =============================================================================

/// Login page, also the landing page after logout
pub const LOGIN_PATH: &str = "/auth/login";

/// Profile page, where password changes are submitted from
pub const PROFILE_PATH: &str = "/auth/profile";

/// Home page for panel users
pub const PANEL_HOME_PATH: &str = "/panel/home";

/// Home page for dashboard users
pub const DASHBOARD_HOME_PATH: &str = "/dashboard/home";
