//! Response bodies.

use serde::{Deserialize, Serialize};

use crate::types::*;

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub username: String,
}

// ============================================================================
// Todo List Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTodoListsResponse {
    pub todo_lists: Vec<TodoListSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTodoListResponse {
    pub todo_list: TodoListDetail,
}

// ============================================================================
// Todo Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTodoResponse {
    pub todo: TodoView,
}

/// Returned by mutations that carry no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}
