//! One-shot flash messages.
//!
//! A flash travels in a short cookie holding only its code (`user_inactive`),
//! never free text, so the cookie value needs no escaping. The next rendered
//! page turns the code back into a message and clears the cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};

use domain::{MIN_ACCOUNT_LENGTH, MIN_PASSWORD_LENGTH};

/// Name of the flash cookie
pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// Every message the auth pages can flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    // Success
    LoggedIn,
    LoggedOut,
    PasswordUpdated,

    // Login
    InvalidCredentials,
    UserInactive,
    InvalidUserType,
    AccountRequired,
    AccountTooShort,
    PasswordRequired,
    LoginPasswordTooShort,

    // Session
    InvalidSession,
    UserNotFound,

    // Password change
    PasswordFieldsRequired,
    PasswordsDoNotMatch,
    CurrentPasswordIncorrect,
    PasswordTooShort,
    PasswordSameAsOld,

    // Fallbacks
    InvalidRequest,
    Generic,
}

impl Flash {
    const ALL: &'static [Flash] = &[
        Flash::LoggedIn,
        Flash::LoggedOut,
        Flash::PasswordUpdated,
        Flash::InvalidCredentials,
        Flash::UserInactive,
        Flash::InvalidUserType,
        Flash::AccountRequired,
        Flash::AccountTooShort,
        Flash::PasswordRequired,
        Flash::LoginPasswordTooShort,
        Flash::InvalidSession,
        Flash::UserNotFound,
        Flash::PasswordFieldsRequired,
        Flash::PasswordsDoNotMatch,
        Flash::CurrentPasswordIncorrect,
        Flash::PasswordTooShort,
        Flash::PasswordSameAsOld,
        Flash::InvalidRequest,
        Flash::Generic,
    ];

    pub fn kind(&self) -> FlashKind {
        match self {
            Flash::LoggedIn | Flash::LoggedOut | Flash::PasswordUpdated => FlashKind::Success,
            _ => FlashKind::Error,
        }
    }

    /// Stable code stored in the cookie (and used as validator error codes)
    pub fn code(&self) -> &'static str {
        match self {
            Flash::LoggedIn => "logged_in",
            Flash::LoggedOut => "logged_out",
            Flash::PasswordUpdated => "password_updated",
            Flash::InvalidCredentials => "invalid_credentials",
            Flash::UserInactive => "user_inactive",
            Flash::InvalidUserType => "invalid_user_type",
            Flash::AccountRequired => "account_required",
            Flash::AccountTooShort => "account_too_short",
            Flash::PasswordRequired => "password_required",
            Flash::LoginPasswordTooShort => "login_password_too_short",
            Flash::InvalidSession => "invalid_session",
            Flash::UserNotFound => "user_not_found",
            Flash::PasswordFieldsRequired => "password_fields_required",
            Flash::PasswordsDoNotMatch => "passwords_do_not_match",
            Flash::CurrentPasswordIncorrect => "current_password_incorrect",
            Flash::PasswordTooShort => "password_too_short",
            Flash::PasswordSameAsOld => "password_same_as_old",
            Flash::InvalidRequest => "invalid_request",
            Flash::Generic => "generic",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.code() == code)
    }

    /// Human-readable text shown on the page
    pub fn message(&self) -> String {
        match self {
            Flash::LoggedIn => "Logged in successfully.".to_string(),
            Flash::LoggedOut => "Logged out successfully.".to_string(),
            Flash::PasswordUpdated => {
                "Password updated. Please log in again with your new password.".to_string()
            }
            Flash::InvalidCredentials => "Invalid account or password.".to_string(),
            Flash::UserInactive => {
                "Your account is not active. Please contact your administrator.".to_string()
            }
            Flash::InvalidUserType => "Invalid user type.".to_string(),
            Flash::AccountRequired => "Account is required.".to_string(),
            Flash::AccountTooShort => {
                format!("Account must be at least {} characters.", MIN_ACCOUNT_LENGTH)
            }
            Flash::PasswordRequired => "Password is required.".to_string(),
            Flash::LoginPasswordTooShort => {
                format!("Password must be at least {} characters.", MIN_PASSWORD_LENGTH)
            }
            Flash::InvalidSession => "Invalid session, please log in again.".to_string(),
            Flash::UserNotFound => "User not found, please log in again.".to_string(),
            Flash::PasswordFieldsRequired => "Please fill in all password fields.".to_string(),
            Flash::PasswordsDoNotMatch => "New passwords do not match.".to_string(),
            Flash::CurrentPasswordIncorrect => "Your current password is incorrect.".to_string(),
            Flash::PasswordTooShort => format!(
                "New password must be at least {} characters.",
                MIN_PASSWORD_LENGTH
            ),
            Flash::PasswordSameAsOld => {
                "New password cannot be the same as the current password.".to_string()
            }
            Flash::InvalidRequest => "Invalid request format.".to_string(),
            Flash::Generic => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Cookie carrying this flash to the next page
    pub fn cookie(&self) -> Cookie<'static> {
        Cookie::build((FLASH_COOKIE, self.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Cookie that clears a consumed flash
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build((FLASH_COOKIE, "")).path("/").build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique_and_parse_back() {
        for flash in Flash::ALL {
            assert_eq!(Flash::from_code(flash.code()), Some(*flash));
        }
        assert_eq!(Flash::from_code("nope"), None);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Flash::LoggedIn.kind(), FlashKind::Success);
        assert_eq!(Flash::UserInactive.kind(), FlashKind::Error);
    }

    #[test]
    fn test_cookie_holds_code_only() {
        let cookie = Flash::PasswordSameAsOld.cookie();
        assert_eq!(cookie.name(), FLASH_COOKIE);
        assert_eq!(cookie.value(), "password_same_as_old");
        assert_eq!(cookie.path(), Some("/"));
    }
}
