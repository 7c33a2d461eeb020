//! Server error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rpc_protocol::{ApiError, ErrorResponse};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request conflicts with existing data.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Authentication required.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Login rejected.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] todo_store::TodoStoreError),

    /// Authentication error.
    #[error("Auth error: {0}")]
    Auth(#[from] auth::AuthError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    fn status_and_error(&self) -> (StatusCode, ApiError) {
        match self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::invalid_request(msg.clone()))
            }
            ServerError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, ApiError::not_found(resource))
            }
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, ApiError::conflict(msg.clone())),
            ServerError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                ApiError::unauthorized("Authentication required"),
            ),
            ServerError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiError::unauthorized("Invalid credentials"),
            ),
            ServerError::Auth(e) => {
                (StatusCode::UNAUTHORIZED, ApiError::unauthorized(e.to_string()))
            }
            // Storage details stay in the log.
            ServerError::Store(_) | ServerError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal_error("Internal server error"),
            ),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_error();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use rpc_protocol::ErrorCode;

    use super::*;

    #[test]
    fn test_status_mapping() {
        let (status, error) =
            ServerError::Conflict("List title must be unique".into()).status_and_error();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error.code, ErrorCode::Conflict);

        let (status, error) = ServerError::NotFound("Todo".into()).status_and_error();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error.message, "Todo not found");
    }

    #[test]
    fn test_store_errors_are_opaque() {
        let err = ServerError::Store(todo_store::TodoStoreError::Database(
            sqlx::Error::Protocol("connection reset".into()),
        ));
        let (status, error) = err.status_and_error();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.message.contains("connection reset"));
    }
}
