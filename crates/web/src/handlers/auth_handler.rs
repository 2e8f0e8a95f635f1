//! Login, logout, profile and password change handlers.

use axum::{
    extract::{Extension, State},
    http::{header::LOCATION, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::info;
use validator::{Validate, ValidationError};

use common::{AppError, Flash, FLASH_COOKIE};
use domain::{UserProfile, LOGIN_PATH, MIN_ACCOUNT_LENGTH, MIN_PASSWORD_LENGTH, PROFILE_PATH};

use crate::extractors::{FormPage, ValidatedForm};
use crate::middleware::{end_session, CurrentSession};
use crate::session::{session_cookie, SessionData};
use crate::state::AppState;
use crate::views;

/// Login form with validation
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(custom(function = "validate_account"))]
    pub account: String,
    #[serde(default)]
    #[validate(custom(function = "validate_login_password"))]
    pub password: String,
}

impl FormPage for LoginForm {
    const PAGE: &'static str = LOGIN_PATH;
}

fn validate_account(account: &str) -> Result<(), ValidationError> {
    if account.is_empty() {
        Err(ValidationError::new("account_required"))
    } else if account.chars().count() < MIN_ACCOUNT_LENGTH {
        Err(ValidationError::new("account_too_short"))
    } else {
        Ok(())
    }
}

fn validate_login_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        Err(ValidationError::new("password_required"))
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        Err(ValidationError::new("login_password_too_short"))
    } else {
        Ok(())
    }
}

/// Password change form with validation.
///
/// Length and reuse rules belong to the auth service; the form only checks
/// presence and that the confirmation matches.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordForm {
    #[serde(default)]
    #[validate(length(min = 1, code = "password_fields_required"))]
    pub current_password: String,
    #[serde(default)]
    #[validate(length(min = 1, code = "password_fields_required"))]
    pub new_password: String,
    #[serde(default)]
    #[validate(
        length(min = 1, code = "password_fields_required"),
        must_match(other = "new_password", code = "passwords_do_not_match")
    )]
    pub confirm_password: String,
}

impl FormPage for UpdatePasswordForm {
    const PAGE: &'static str = PROFILE_PATH;
}

/// Create auth routes open to guests
pub fn guest_routes() -> Router<AppState> {
    Router::new().route("/login", get(show_login).post(login))
}

/// Create auth routes that need a session
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", get(logout))
        .route("/profile", get(profile))
        .route("/profile/update-password", post(update_password))
}

/// Take the pending flash, clearing its cookie
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar
        .get(FLASH_COOKIE)
        .and_then(|cookie| Flash::from_code(cookie.value()));
    match flash {
        Some(_) => (jar.remove(Flash::removal_cookie()), flash),
        None => (jar, None),
    }
}

/// 302 redirect, used after a successful form post
fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}

/// Turn an error into a response, destroying the session first if the error
/// means it no longer points at a usable user.
async fn fail(state: &AppState, jar: CookieJar, session: &CurrentSession, err: AppError) -> Response {
    let jar = if err.ends_session() {
        end_session(state, jar, &session.id).await
    } else {
        jar
    };
    (jar, err).into_response()
}

/// Render the login page
pub async fn show_login(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, Html(views::login_page(flash)))
}

/// Check credentials and open a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<Response, AppError> {
    let user = state.auth.authenticate(&form.account, &form.password).await?;

    let session_id = state.sessions.create(&SessionData::from_user(&user)).await?;
    info!(user_id = user.id, user_type = %user.user_type, "User logged in");

    let jar = jar
        .add(session_cookie(&state.config.session, session_id))
        .add(Flash::LoggedIn.cookie());
    Ok((jar, found(user.user_type.home_path())).into_response())
}

/// Destroy the session and return to the login page
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(session): Extension<CurrentSession>,
) -> Response {
    let jar = end_session(&state, jar, &session.id).await;
    info!(user_id = session.data.user_id, "User logged out");

    (jar.add(Flash::LoggedOut.cookie()), found(LOGIN_PATH)).into_response()
}

/// Show the profile of the session's user
pub async fn profile(jar: CookieJar, Extension(session): Extension<CurrentSession>) -> Response {
    let (jar, flash) = take_flash(jar);
    let page = views::profile_page(&UserProfile::from(session.user), flash);
    (jar, Html(page)).into_response()
}

/// Change the password, then force a fresh login
pub async fn update_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(session): Extension<CurrentSession>,
    ValidatedForm(form): ValidatedForm<UpdatePasswordForm>,
) -> Response {
    let user_id = session.data.user_id;
    if let Err(e) = state
        .auth
        .update_password(user_id, &form.current_password, &form.new_password)
        .await
    {
        return fail(&state, jar, &session, e.into()).await;
    }

    let jar = end_session(&state, jar, &session.id).await;
    info!(user_id, "Password updated, session closed");

    (jar.add(Flash::PasswordUpdated.cookie()), found(LOGIN_PATH)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_form(account: &str, password: &str) -> LoginForm {
        LoginForm {
            account: account.to_string(),
            password: password.to_string(),
        }
    }

    fn password_form(current: &str, new: &str, confirm: &str) -> UpdatePasswordForm {
        UpdatePasswordForm {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    fn codes(errors: validator::ValidationErrors) -> Vec<String> {
        let mut codes: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter().map(|e| e.code.to_string()))
            .collect();
        codes.sort();
        codes
    }

    #[test]
    fn test_login_form_rules() {
        assert!(login_form("alice", "secret1").validate().is_ok());
        assert_eq!(
            codes(login_form("", "secret1").validate().unwrap_err()),
            vec!["account_required"]
        );
        assert_eq!(
            codes(login_form("al", "secret1").validate().unwrap_err()),
            vec!["account_too_short"]
        );
        assert_eq!(
            codes(login_form("alice", "").validate().unwrap_err()),
            vec!["password_required"]
        );
        assert_eq!(
            codes(login_form("alice", "12345").validate().unwrap_err()),
            vec!["login_password_too_short"]
        );
        // Characters, not bytes: five multi-byte characters are still too short
        assert_eq!(
            codes(login_form("alice", "ééééé").validate().unwrap_err()),
            vec!["login_password_too_short"]
        );
        assert!(login_form("alice", "éééééé").validate().is_ok());
    }

    #[test]
    fn test_update_password_form_rules() {
        assert!(password_form("secret1", "newpass1", "newpass1")
            .validate()
            .is_ok());
        // Short new passwords are left to the auth service
        assert!(password_form("secret1", "abc", "abc").validate().is_ok());
        assert_eq!(
            codes(password_form("", "newpass1", "newpass1").validate().unwrap_err()),
            vec!["password_fields_required"]
        );
        assert_eq!(
            codes(password_form("secret1", "newpass1", "newpass2").validate().unwrap_err()),
            vec!["passwords_do_not_match"]
        );
    }

    #[test]
    fn test_take_flash_clears_cookie() {
        let jar = CookieJar::new().add(Flash::PasswordUpdated.cookie());
        let (jar, flash) = take_flash(jar);

        assert_eq!(flash, Some(Flash::PasswordUpdated));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }
}
