//! Middleware for the auth pages.

mod session;

pub use session::{end_session, guest_only, require_session, CurrentSession};
