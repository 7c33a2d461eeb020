//! Todo store trait definitions.

use async_trait::async_trait;
use entities::{Todo, TodoId, TodoList, TodoListId};

use crate::{TodoStoreError, TodoStoreResult};

/// Storage operations for one user's todo lists.
///
/// A store is bound to a username when it is constructed. Every operation is
/// scoped to that user: lists and todos owned by anyone else behave exactly as
/// if they did not exist.
///
/// Operations that can only fail because the target is missing report that as
/// `Ok(false)` or `Ok(None)`. `Err` is reserved for failures of the
/// underlying storage.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Username every operation is scoped to.
    fn username(&self) -> &str;

    // =========================================================================
    // Todo list operations
    // =========================================================================

    /// Creates a new empty todo list. Returns `false` if the title collides
    /// with a uniqueness constraint enforced by the store.
    async fn create_todo_list(&self, title: &str) -> TodoStoreResult<bool>;

    /// Deletes a todo list and all of its todos.
    async fn delete_todo_list(&self, list_id: TodoListId) -> TodoStoreResult<bool>;

    /// Renames a todo list.
    async fn set_todo_list_title(&self, list_id: TodoListId, title: &str)
        -> TodoStoreResult<bool>;

    /// Marks every undone todo in the list as done. Returns `true` whenever
    /// the list exists, even if nothing was left to complete.
    async fn complete_all_todos(&self, list_id: TodoListId) -> TodoStoreResult<bool>;

    /// Loads a todo list together with its todos.
    async fn load_todo_list(&self, list_id: TodoListId) -> TodoStoreResult<Option<TodoList>>;

    /// Returns true if the user already has a list with exactly this title.
    async fn exists_todo_list_title(&self, title: &str) -> TodoStoreResult<bool>;

    /// Returns all of the user's lists, undone lists first, each group
    /// ordered by case-insensitive title.
    async fn sorted_todo_lists(&self) -> TodoStoreResult<Vec<TodoList>>;

    // =========================================================================
    // Todo operations
    // =========================================================================

    /// Adds an undone todo to a list.
    async fn create_todo(&self, list_id: TodoListId, title: &str) -> TodoStoreResult<bool>;

    /// Removes a todo from a list.
    async fn delete_todo(&self, list_id: TodoListId, todo_id: TodoId) -> TodoStoreResult<bool>;

    /// Flips a todo between done and undone.
    async fn toggle_done_todo(&self, list_id: TodoListId, todo_id: TodoId)
        -> TodoStoreResult<bool>;

    /// Loads a single todo from a list.
    async fn load_todo(&self, list_id: TodoListId, todo_id: TodoId)
        -> TodoStoreResult<Option<Todo>>;

    /// Returns the list's todos, undone first, each group ordered by
    /// case-insensitive title.
    async fn sorted_todos(&self, list: &TodoList) -> TodoStoreResult<Vec<Todo>>;

    // =========================================================================
    // Credentials
    // =========================================================================

    /// Returns true if `username` and `password` identify a valid user.
    async fn valid_credentials(&self, username: &str, password: &str) -> TodoStoreResult<bool>;

    /// Returns true if `error` reports a `UNIQUE` constraint violation from
    /// this store's backend.
    fn is_unique_constraint_violation(&self, error: &TodoStoreError) -> bool;

    /// Does the todo list have any undone todos?
    fn has_undone_todos(&self, list: &TodoList) -> bool {
        list.has_undone_todos()
    }

    /// Is the todo list done? Empty lists never are.
    fn is_done_todo_list(&self, list: &TodoList) -> bool {
        list.is_done()
    }
}
