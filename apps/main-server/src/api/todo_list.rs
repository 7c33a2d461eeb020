//! Todo list API endpoints.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use rpc_protocol::{TodoListDetail, TodoListSummary, requests::*, responses::*};
use todo_store::TodoStore;

use super::validate_title;
use crate::error::{ServerError, ServerResult};
use crate::middleware::CurrentUser;
use crate::state::AppState;

const LIST_TITLE: &str = "List title";
const DUPLICATE_TITLE: &str = "List title must be unique";

fn list_not_found() -> ServerError {
    ServerError::NotFound("Todo list".to_string())
}

/// Maps a store error to a 409 when it reports a duplicate title.
fn conflict_on_duplicate(store: &dyn TodoStore, error: todo_store::TodoStoreError) -> ServerError {
    if store.is_unique_constraint_violation(&error) {
        ServerError::Conflict(DUPLICATE_TITLE.to_string())
    } else {
        error.into()
    }
}

/// Lists the user's todo lists, undone lists first.
pub async fn list_todo_lists(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ServerResult<Json<ListTodoListsResponse>> {
    let store = state.store_for(&user).await;
    let lists = store.sorted_todo_lists().await?;

    tracing::debug!(username = %user.username, count = lists.len(), "Listed todo lists");

    Ok(Json(ListTodoListsResponse {
        todo_lists: lists.iter().map(TodoListSummary::from).collect(),
    }))
}

/// Creates a new todo list.
pub async fn create_todo_list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateTodoListRequest>,
) -> ServerResult<Json<SuccessResponse>> {
    let title = validate_title(&request.title, LIST_TITLE)?;
    let store = state.store_for(&user).await;
    let _guard = state.title_guard(&user).await;

    if store.exists_todo_list_title(&title).await? {
        return Err(ServerError::Conflict(DUPLICATE_TITLE.to_string()));
    }

    match store.create_todo_list(&title).await {
        Ok(true) => {}
        Ok(false) => return Err(ServerError::Conflict(DUPLICATE_TITLE.to_string())),
        Err(e) => return Err(conflict_on_duplicate(store.as_ref(), e)),
    }

    tracing::info!(username = %user.username, title = %title, "Todo list created");

    Ok(Json(SuccessResponse::with_message("The todo list has been created.")))
}

/// Gets a todo list with its todos in display order.
pub async fn get_todo_list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<TodoListIdRequest>,
) -> ServerResult<Json<GetTodoListResponse>> {
    let store = state.store_for(&user).await;
    let list = store
        .load_todo_list(request.list_id)
        .await?
        .ok_or_else(list_not_found)?;
    let todos = store.sorted_todos(&list).await?;

    Ok(Json(GetTodoListResponse {
        todo_list: TodoListDetail::new(&list, &todos),
    }))
}

/// Renames a todo list.
pub async fn rename_todo_list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<RenameTodoListRequest>,
) -> ServerResult<Json<SuccessResponse>> {
    let title = validate_title(&request.title, LIST_TITLE)?;
    let store = state.store_for(&user).await;
    let _guard = state.title_guard(&user).await;

    let list = store
        .load_todo_list(request.list_id)
        .await?
        .ok_or_else(list_not_found)?;
    if list.title != title && store.exists_todo_list_title(&title).await? {
        return Err(ServerError::Conflict(DUPLICATE_TITLE.to_string()));
    }

    match store.set_todo_list_title(request.list_id, &title).await {
        Ok(true) => {}
        Ok(false) => return Err(list_not_found()),
        Err(e) => return Err(conflict_on_duplicate(store.as_ref(), e)),
    }

    tracing::info!(list_id = request.list_id, title = %title, "Todo list renamed");

    Ok(Json(SuccessResponse::with_message("The todo list has been updated.")))
}

/// Deletes a todo list and its todos.
pub async fn delete_todo_list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<TodoListIdRequest>,
) -> ServerResult<Json<SuccessResponse>> {
    let store = state.store_for(&user).await;
    if !store.delete_todo_list(request.list_id).await? {
        return Err(list_not_found());
    }

    tracing::info!(list_id = request.list_id, "Todo list deleted");

    Ok(Json(SuccessResponse::with_message("The todo list has been deleted.")))
}

/// Marks every todo in a list as done.
pub async fn complete_all_todos(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<TodoListIdRequest>,
) -> ServerResult<Json<SuccessResponse>> {
    let store = state.store_for(&user).await;
    if !store.complete_all_todos(request.list_id).await? {
        return Err(list_not_found());
    }

    tracing::info!(list_id = request.list_id, "Completed all todos");

    Ok(Json(SuccessResponse::with_message("All todos have been completed.")))
}
