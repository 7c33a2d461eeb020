//! Session-backed todo store.

use std::sync::Arc;

use async_trait::async_trait;
use auth::UserDirectory;
use entities::{Todo, TodoId, TodoList, TodoListId};
use tokio::sync::RwLock;

use crate::{
    id::IdGenerator, seed::seed_todo_lists, sort::sort_by_completion, TodoStore, TodoStoreError,
    TodoStoreResult,
};

/// Todo lists held for one user session.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    todo_lists: Vec<TodoList>,
    ids: IdGenerator,
}

impl SessionData {
    /// Creates session data with no lists.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates session data pre-populated with the seed lists.
    pub fn seeded() -> Self {
        let mut ids = IdGenerator::new();
        let todo_lists = seed_todo_lists(&mut ids);
        Self { todo_lists, ids }
    }

    /// Wraps the data for sharing between the requests of one session.
    pub fn shared(self) -> Arc<RwLock<SessionData>> {
        Arc::new(RwLock::new(self))
    }

    /// Number of lists across all users.
    pub fn len(&self) -> usize {
        self.todo_lists.len()
    }

    /// Returns true if the session holds no lists.
    pub fn is_empty(&self) -> bool {
        self.todo_lists.is_empty()
    }

    fn list(&self, username: &str, list_id: TodoListId) -> Option<&TodoList> {
        self.todo_lists
            .iter()
            .find(|list| list.id == list_id && list.username == username)
    }

    fn list_mut(&mut self, username: &str, list_id: TodoListId) -> Option<&mut TodoList> {
        self.todo_lists
            .iter_mut()
            .find(|list| list.id == list_id && list.username == username)
    }

    fn todo_mut(
        &mut self,
        username: &str,
        list_id: TodoListId,
        todo_id: TodoId,
    ) -> Option<&mut Todo> {
        self.list_mut(username, list_id)?
            .todos
            .iter_mut()
            .find(|todo| todo.id == todo_id && todo.username == username)
    }
}

/// Todo store operating on the in-memory data of one session.
///
/// The session data is handed in at construction; the store never creates or
/// discards it. All reads return clones, so callers cannot change stored state
/// through returned values.
#[derive(Debug, Clone)]
pub struct SessionTodoStore {
    session: Arc<RwLock<SessionData>>,
    username: String,
    users: Arc<UserDirectory>,
}

impl SessionTodoStore {
    /// Creates a store bound to `username` over the given session data.
    pub fn new(
        session: Arc<RwLock<SessionData>>,
        username: impl Into<String>,
        users: Arc<UserDirectory>,
    ) -> Self {
        Self {
            session,
            username: username.into(),
            users,
        }
    }
}

#[async_trait]
impl TodoStore for SessionTodoStore {
    fn username(&self) -> &str {
        &self.username
    }

    // =========================================================================
    // Todo list operations
    // =========================================================================

    async fn create_todo_list(&self, title: &str) -> TodoStoreResult<bool> {
        let mut session = self.session.write().await;
        let id = session.ids.next_id();
        session
            .todo_lists
            .push(TodoList::new(id, title, self.username.as_str()));
        tracing::debug!(list_id = id, "Todo list created in session");
        Ok(true)
    }

    async fn delete_todo_list(&self, list_id: TodoListId) -> TodoStoreResult<bool> {
        let mut session = self.session.write().await;
        let index = session
            .todo_lists
            .iter()
            .position(|list| list.id == list_id && list.username == self.username);

        match index {
            Some(index) => {
                session.todo_lists.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_todo_list_title(
        &self,
        list_id: TodoListId,
        title: &str,
    ) -> TodoStoreResult<bool> {
        let mut session = self.session.write().await;
        match session.list_mut(&self.username, list_id) {
            Some(list) => {
                list.title = title.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn complete_all_todos(&self, list_id: TodoListId) -> TodoStoreResult<bool> {
        let mut session = self.session.write().await;
        let Some(list) = session.list_mut(&self.username, list_id) else {
            return Ok(false);
        };

        list.todos
            .iter_mut()
            .filter(|todo| !todo.done)
            .for_each(|todo| todo.done = true);
        Ok(true)
    }

    async fn load_todo_list(&self, list_id: TodoListId) -> TodoStoreResult<Option<TodoList>> {
        let session = self.session.read().await;
        Ok(session.list(&self.username, list_id).cloned())
    }

    async fn exists_todo_list_title(&self, title: &str) -> TodoStoreResult<bool> {
        let session = self.session.read().await;
        Ok(session
            .todo_lists
            .iter()
            .any(|list| list.title == title && list.username == self.username))
    }

    async fn sorted_todo_lists(&self) -> TodoStoreResult<Vec<TodoList>> {
        let session = self.session.read().await;
        let lists = session
            .todo_lists
            .iter()
            .filter(|list| list.username == self.username)
            .cloned()
            .collect();
        Ok(sort_by_completion(lists))
    }

    // =========================================================================
    // Todo operations
    // =========================================================================

    async fn create_todo(&self, list_id: TodoListId, title: &str) -> TodoStoreResult<bool> {
        let mut guard = self.session.write().await;
        let session = &mut *guard;
        let Some(list) = session
            .todo_lists
            .iter_mut()
            .find(|list| list.id == list_id && list.username == self.username)
        else {
            return Ok(false);
        };

        let id = session.ids.next_id();
        list.todos.push(Todo::new(id, title, self.username.as_str()));
        Ok(true)
    }

    async fn delete_todo(&self, list_id: TodoListId, todo_id: TodoId) -> TodoStoreResult<bool> {
        let mut session = self.session.write().await;
        let Some(list) = session.list_mut(&self.username, list_id) else {
            return Ok(false);
        };

        let index = list
            .todos
            .iter()
            .position(|todo| todo.id == todo_id && todo.username == self.username);
        match index {
            Some(index) => {
                list.todos.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn toggle_done_todo(
        &self,
        list_id: TodoListId,
        todo_id: TodoId,
    ) -> TodoStoreResult<bool> {
        let mut session = self.session.write().await;
        match session.todo_mut(&self.username, list_id, todo_id) {
            Some(todo) => {
                todo.done = !todo.done;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn load_todo(
        &self,
        list_id: TodoListId,
        todo_id: TodoId,
    ) -> TodoStoreResult<Option<Todo>> {
        let session = self.session.read().await;
        Ok(session
            .list(&self.username, list_id)
            .and_then(|list| list.find_todo(todo_id))
            .filter(|todo| todo.username == self.username)
            .cloned())
    }

    async fn sorted_todos(&self, list: &TodoList) -> TodoStoreResult<Vec<Todo>> {
        if list.username != self.username {
            return Ok(Vec::new());
        }

        let todos = list
            .todos
            .iter()
            .filter(|todo| todo.username == self.username)
            .cloned()
            .collect();
        Ok(sort_by_completion(todos))
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    async fn valid_credentials(&self, username: &str, password: &str) -> TodoStoreResult<bool> {
        Ok(self.users.verify(username, password)?)
    }

    fn is_unique_constraint_violation(&self, _error: &TodoStoreError) -> bool {
        false
    }
}
