//! Route configuration.

use axum::{middleware, routing::get, Router};

use crate::handlers::{guest_routes, health_check, home_routes, member_routes};
use crate::middleware::{guest_only, require_session};
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no session)
        .route("/health", get(health_check))
        // Login page (guests only)
        .nest(
            "/auth",
            guest_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), guest_only))
                .merge(member_routes().route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_session,
                ))),
        )
        // Landing pages (session required)
        .merge(home_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        )))
        .with_state(state)
}
