//! HTTP handlers.

mod auth_handler;
mod health;
mod home_handler;

pub use auth_handler::{guest_routes, member_routes, LoginForm, UpdatePasswordForm};
pub use health::health_check;
pub use home_handler::home_routes;
