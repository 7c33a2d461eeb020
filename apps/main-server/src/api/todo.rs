//! Todo API endpoints.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use rpc_protocol::{TodoView, requests::*, responses::*};

use super::validate_title;
use crate::error::{ServerError, ServerResult};
use crate::middleware::CurrentUser;
use crate::state::AppState;

fn todo_not_found() -> ServerError {
    ServerError::NotFound("Todo".to_string())
}

/// Adds a todo to a list.
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateTodoRequest>,
) -> ServerResult<Json<SuccessResponse>> {
    let title = validate_title(&request.title, "Todo title")?;
    let store = state.store_for(&user).await;

    if !store.create_todo(request.list_id, &title).await? {
        return Err(ServerError::NotFound("Todo list".to_string()));
    }

    tracing::info!(list_id = request.list_id, title = %title, "Todo created");

    Ok(Json(SuccessResponse::with_message("The todo was added.")))
}

/// Gets a single todo.
pub async fn get_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<TodoRefRequest>,
) -> ServerResult<Json<GetTodoResponse>> {
    let store = state.store_for(&user).await;
    let todo = store
        .load_todo(request.list_id, request.todo_id)
        .await?
        .ok_or_else(todo_not_found)?;

    Ok(Json(GetTodoResponse {
        todo: TodoView::from(&todo),
    }))
}

/// Flips a todo between done and undone.
pub async fn toggle_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<TodoRefRequest>,
) -> ServerResult<Json<SuccessResponse>> {
    let store = state.store_for(&user).await;
    if !store
        .toggle_done_todo(request.list_id, request.todo_id)
        .await?
    {
        return Err(todo_not_found());
    }

    tracing::info!(
        list_id = request.list_id,
        todo_id = request.todo_id,
        "Todo toggled"
    );

    Ok(Json(SuccessResponse::with_message("The todo has been updated.")))
}

/// Removes a todo.
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<TodoRefRequest>,
) -> ServerResult<Json<SuccessResponse>> {
    let store = state.store_for(&user).await;
    if !store.delete_todo(request.list_id, request.todo_id).await? {
        return Err(todo_not_found());
    }

    tracing::info!(
        list_id = request.list_id,
        todo_id = request.todo_id,
        "Todo deleted"
    );

    Ok(Json(SuccessResponse::with_message("The todo has been deleted.")))
}
