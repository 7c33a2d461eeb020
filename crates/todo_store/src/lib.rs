//! Todo list storage for the todo list manager.
//!
//! This crate provides a storage abstraction over todo lists and their todos.
//! Two implementations share one contract: a session-backed store that keeps
//! a seeded in-memory copy per user session, and a PostgreSQL store where the
//! database is the only source of truth.

mod error;
pub mod id;
pub mod pg;
pub mod schema;
pub mod seed;
pub mod session;
pub mod sort;
mod traits;

pub use error::*;
pub use pg::PgTodoStore;
pub use session::{SessionData, SessionTodoStore};
pub use traits::*;
