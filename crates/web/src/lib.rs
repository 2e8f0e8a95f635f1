//! Web Library
//!
//! This crate provides the HTML login flow on top of the auth service:
//! server-side sessions, session guards, flash messages and form validation.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use auth_service_lib::service::AuthService;

use crate::config::WebConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server with the given configuration.
pub async fn run_server(
    config: WebConfig,
    auth: Arc<dyn AuthService>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Open session store
    let sessions = session::connect(&config.session).await?;

    let addr: SocketAddr = config.server.addr().parse()?;
    let state = AppState::new(auth, sessions, config);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    info!("Web server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
