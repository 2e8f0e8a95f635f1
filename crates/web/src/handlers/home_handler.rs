//! Landing pages the login flow redirects to.

use axum::{
    extract::Extension,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::CookieJar;

use common::{AppError, Flash};
use domain::{UserType, DASHBOARD_HOME_PATH, PANEL_HOME_PATH};

use super::auth_handler::take_flash;
use crate::middleware::CurrentSession;
use crate::state::AppState;
use crate::views;

/// Create home routes
pub fn home_routes() -> Router<AppState> {
    Router::new()
        .route(PANEL_HOME_PATH, get(panel_home))
        .route(DASHBOARD_HOME_PATH, get(dashboard_home))
}

pub async fn panel_home(jar: CookieJar, Extension(session): Extension<CurrentSession>) -> Response {
    home(UserType::Panel, jar, session)
}

pub async fn dashboard_home(
    jar: CookieJar,
    Extension(session): Extension<CurrentSession>,
) -> Response {
    home(UserType::Dashboard, jar, session)
}

/// Render a home page, bouncing users of the other type to their own
fn home(page_type: UserType, jar: CookieJar, session: CurrentSession) -> Response {
    let user_type = session.data.user_type;
    if user_type != page_type {
        return AppError::validation(Flash::InvalidUserType, user_type.home_path())
            .into_response();
    }

    let (jar, flash) = take_flash(jar);
    (jar, Html(views::home_page(&session.data, flash))).into_response()
}
