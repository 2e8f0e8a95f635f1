//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Web-facing error handling (flash message + redirect per core error)
//! - Flash message codes and cookies
//! - Configuration structures

pub mod config;
pub mod error;
pub mod flash;

pub use config::*;
pub use error::{AppError, AppResult};
pub use flash::{Flash, FlashKind, FLASH_COOKIE};
