//! Request bodies.

use entities::{TodoId, TodoListId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Todo List Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoListRequest {
    pub title: String,
}

/// Body for the operations that only need a list ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListIdRequest {
    pub list_id: TodoListId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameTodoListRequest {
    pub list_id: TodoListId,
    pub title: String,
}

// ============================================================================
// Todo Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub list_id: TodoListId,
    pub title: String,
}

/// Identifies one todo inside one list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoRefRequest {
    pub list_id: TodoListId,
    pub todo_id: TodoId,
}
