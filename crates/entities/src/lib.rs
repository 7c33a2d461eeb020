//! Core entity definitions for the todo list manager.
//!
//! This crate defines the value types shared by the persistence layer and the
//! server: todo lists, the todos inside them, and the user records used to
//! check credentials.

mod todo;
mod user;

pub use todo::*;
pub use user::*;
