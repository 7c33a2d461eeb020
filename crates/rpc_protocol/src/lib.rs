//! JSON protocol definitions for the todo list server.
//!
//! This crate defines the request and response bodies exchanged with the
//! server, plus the error object every failed request returns.

mod error;
pub mod requests;
pub mod responses;
mod types;

pub use error::*;
pub use types::*;
