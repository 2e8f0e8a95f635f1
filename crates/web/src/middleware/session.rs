//! Session guards.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::{debug, warn};

use common::AppError;
use domain::{AuthError, User};

use crate::session::{removal_cookie, SessionData};
use crate::state::AppState;

/// Session resolved by [`require_session`], with its user freshly loaded.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub id: String,
    pub data: SessionData,
    pub user: User,
}

/// Destroy the server-side session and clear its cookie.
///
/// Store failures are logged and swallowed; the cookie is cleared either way.
pub async fn end_session(state: &AppState, jar: CookieJar, id: &str) -> CookieJar {
    if let Err(e) = state.sessions.destroy(id).await {
        warn!(error = %e, "Failed to destroy session");
    }
    jar.remove(removal_cookie(&state.config.session))
}

/// Reject requests without a live session whose user still exists and is active.
///
/// A missing cookie redirects to the login page. Any other failure (unknown
/// or expired ID, store error, deleted or deactivated user) also destroys the
/// session the cookie named.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(id) = jar
        .get(&state.config.session.cookie_name)
        .map(|c| c.value().to_string())
    else {
        return AppError::InvalidSession.into_response();
    };

    let data = match state.sessions.load(&id).await {
        Ok(Some(data)) if data.status => data,
        Ok(_) => {
            debug!("Session missing, expired or inactive");
            let jar = end_session(&state, jar, &id).await;
            return (jar, AppError::InvalidSession).into_response();
        }
        Err(e) => {
            warn!(error = %e, "Failed to load session");
            let jar = end_session(&state, jar, &id).await;
            return (jar, AppError::InvalidSession).into_response();
        }
    };

    let user = match state.auth.get_user_profile(data.user_id).await {
        Ok(user) if user.is_active() => user,
        Ok(user) => {
            debug!(user_id = user.id, "Session user deactivated");
            let jar = end_session(&state, jar, &id).await;
            return (jar, AppError::from(AuthError::UserInactive)).into_response();
        }
        Err(e) => {
            let jar = end_session(&state, jar, &id).await;
            return (jar, AppError::from(e)).into_response();
        }
    };

    request
        .extensions_mut()
        .insert(CurrentSession { id, data, user });
    next.run(request).await
}

/// Send already authenticated clients to their home page.
pub async fn guest_only(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(&state.config.session.cookie_name) {
        if let Ok(Some(data)) = state.sessions.load(cookie.value()).await {
            return Redirect::to(data.user_type.home_path()).into_response();
        }
    }

    next.run(request).await
}
