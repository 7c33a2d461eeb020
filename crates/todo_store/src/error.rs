//! Todo store error types.

use thiserror::Error;

/// Message PostgreSQL reports when an insert collides with a `UNIQUE` constraint.
const UNIQUE_VIOLATION_MARKER: &str = "duplicate key value violates unique constraint";

/// Errors that can occur during todo store operations.
///
/// Absence is never an error: lookups and mutations report it as `None` or
/// `false`.
#[derive(Debug, Error)]
pub enum TodoStoreError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Credential check failed for a reason other than a mismatch.
    #[error("Credential error: {0}")]
    Credentials(#[from] auth::AuthError),
}

/// Result type for todo store operations.
pub type TodoStoreResult<T> = Result<T, TodoStoreError>;

/// Returns true if `error` reports a `UNIQUE` constraint violation.
///
/// Uses the driver's structured error kind when the error came from the
/// database, and falls back to matching the PostgreSQL message text.
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() {
            return true;
        }
    }
    error.to_string().contains(UNIQUE_VIOLATION_MARKER)
}
