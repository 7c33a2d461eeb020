//! Authentication middleware.

use std::sync::Arc;

use auth::Claims;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ServerError;
use crate::state::AppState;

/// The signed-in user behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Username from the token subject.
    pub username: String,
    /// Session the token belongs to.
    pub session_id: String,
    /// Token expiry as a Unix timestamp.
    pub expires_at: i64,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = auth::AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            username: claims.username()?.to_string(),
            session_id: claims.session_id().to_string(),
            expires_at: claims.exp,
        })
    }
}

/// Extracts the JWT token from the Authorization header.
fn extract_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Authentication middleware.
///
/// Validates the bearer token and stores the [`CurrentUser`] in the request
/// extensions. Requests without a valid token are rejected with 401.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(&request) else {
        return ServerError::AuthenticationRequired.into_response();
    };

    let user = match state
        .jwt_manager
        .validate_token(token)
        .and_then(CurrentUser::try_from)
    {
        Ok(user) => user,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            return ServerError::AuthenticationRequired.into_response();
        }
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}
