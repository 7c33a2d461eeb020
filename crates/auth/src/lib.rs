//! Authentication for the todo list manager.
//!
//! This crate provides:
//! - Argon2 password hashing and verification
//! - The directory of configured users allowed to sign in
//! - JWT session tokens carrying the username and a session ID

mod error;
mod jwt;
mod password;
mod user;

pub use error::*;
pub use jwt::*;
pub use password::*;
pub use user::*;

/// Default session lifetime in hours.
pub const DEFAULT_SESSION_HOURS: u64 = 24;

/// Default JWT issuer.
pub const DEFAULT_JWT_ISSUER: &str = "todos";
