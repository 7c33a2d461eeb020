//! Authentication API endpoints.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use rpc_protocol::{requests::*, responses::*};

use crate::error::{ServerError, ServerResult};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Signs a user in and starts a new session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<LoginResponse>> {
    let store = state.credentials_store(&request.username);
    if !store
        .valid_credentials(&request.username, &request.password)
        .await?
    {
        tracing::warn!(username = %request.username, "Failed login attempt");
        return Err(ServerError::InvalidCredentials);
    }

    let issued = state
        .jwt_manager
        .generate_token(&request.username)
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    tracing::info!(
        username = %request.username,
        session_id = %issued.session_id,
        "User signed in"
    );

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_in: state.jwt_manager.expiration_seconds(),
    }))
}

/// Ends the current session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ServerResult<Json<SuccessResponse>> {
    state.end_session(&user.session_id).await;

    tracing::info!(username = %user.username, "User signed out");

    Ok(Json(SuccessResponse::with_message("You have been signed out.")))
}

/// Gets the current authenticated user.
pub async fn get_current_user(
    Extension(user): Extension<CurrentUser>,
) -> ServerResult<Json<MeResponse>> {
    Ok(Json(MeResponse {
        username: user.username,
    }))
}
