//! Web-facing error handling.
//!
//! Wraps the core error enums and decides, for each outcome, what the user
//! sees (a flash message), where they are sent (a redirect), and whether the
//! current session must be torn down. Converting into an axum `Response`
//! yields a `303 See Other` carrying the flash cookie.

use axum::{
    http::{
        header::{LOCATION, SET_COOKIE},
        StatusCode,
    },
    response::{IntoResponse, Response},
};
use thiserror::Error;

use domain::{AuthError, PasswordError, ProfileError, LOGIN_PATH, PROFILE_PATH};

use crate::flash::Flash;

/// Application error types for the auth pages.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    /// No usable session on a route that requires one
    #[error("Invalid session")]
    InvalidSession,

    /// Form input rejected before reaching the core
    #[error("Validation failed: {}", .flash.code())]
    Validation {
        flash: Flash,
        redirect: &'static str,
    },

    /// Session store failure
    #[error("Session store error: {0}")]
    Session(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "AUTH_ERROR",
            AppError::Profile(_) => "PROFILE_ERROR",
            AppError::Password(_) => "PASSWORD_ERROR",
            AppError::InvalidSession => "INVALID_SESSION",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Session(_) => "SESSION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to the user.
    ///
    /// Unknown account and wrong password share one message so the login
    /// form cannot be used to enumerate accounts.
    pub fn flash(&self) -> Flash {
        match self {
            AppError::Auth(AuthError::UserNotFound | AuthError::InvalidCredentials) => {
                Flash::InvalidCredentials
            }
            AppError::Auth(AuthError::UserInactive) => Flash::UserInactive,
            AppError::Profile(ProfileError::UserNotFound)
            | AppError::Password(PasswordError::UserNotFound) => Flash::UserNotFound,
            AppError::Password(PasswordError::CurrentPasswordIncorrect) => {
                Flash::CurrentPasswordIncorrect
            }
            AppError::Password(PasswordError::TooShort) => Flash::PasswordTooShort,
            AppError::Password(PasswordError::SameAsOld) => Flash::PasswordSameAsOld,
            AppError::InvalidSession => Flash::InvalidSession,
            AppError::Validation { flash, .. } => *flash,
            AppError::Auth(AuthError::Generic)
            | AppError::Profile(ProfileError::Generic)
            | AppError::Password(
                PasswordError::HashingFailed
                | PasswordError::DatabaseUpdateFailed
                | PasswordError::Generic,
            )
            | AppError::Session(_)
            | AppError::Internal(_) => Flash::Generic,
        }
    }

    /// Page the user is sent back to
    pub fn redirect_target(&self) -> &'static str {
        match self {
            AppError::Password(
                PasswordError::CurrentPasswordIncorrect
                | PasswordError::TooShort
                | PasswordError::SameAsOld,
            ) => PROFILE_PATH,
            AppError::Validation { redirect, .. } => *redirect,
            _ => LOGIN_PATH,
        }
    }

    /// Whether the current session no longer points at a usable user
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            AppError::Profile(ProfileError::UserNotFound)
                | AppError::Password(PasswordError::UserNotFound)
                | AppError::InvalidSession
        )
    }

    /// Whether this is a business/user outcome rather than an infrastructure failure
    pub fn is_expected(&self) -> bool {
        match self {
            AppError::Auth(e) => e.is_expected(),
            AppError::Profile(e) => e.is_expected(),
            AppError::Password(e) => e.is_expected(),
            AppError::InvalidSession | AppError::Validation { .. } => true,
            AppError::Session(_) | AppError::Internal(_) => false,
        }
    }

    /// Create a validation error that sends the user back to `redirect`
    pub fn validation(flash: Flash, redirect: &'static str) -> Self {
        AppError::Validation { flash, redirect }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        AppError::Session(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_expected() {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        } else {
            tracing::error!(code = self.code(), error = ?self, "Request failed");
        }

        let cookie = self.flash().cookie().to_string();
        (
            StatusCode::SEE_OTHER,
            [(LOCATION, self.redirect_target().to_string()), (SET_COOKIE, cookie)],
        )
            .into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
