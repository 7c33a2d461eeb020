//! Todo list and todo entity definitions.

use serde::{Deserialize, Serialize};

/// Identifier of a todo list.
pub type TodoListId = i32;

/// Identifier of a todo.
pub type TodoId = i32;

/// A single task item inside a todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier.
    pub id: TodoId,
    /// Task title.
    pub title: String,
    /// Owner. Always matches the owner of the parent list.
    pub username: String,
    /// Completion flag.
    pub done: bool,
}

impl Todo {
    /// Creates a new, not yet done todo.
    pub fn new(id: TodoId, title: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            username: username.into(),
            done: false,
        }
    }

    /// Sets the completion flag.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}

/// A named, user-owned ordered collection of todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// Unique identifier.
    pub id: TodoListId,
    /// List title, unique per user at creation time.
    pub title: String,
    /// Owner.
    pub username: String,
    /// Todos in insertion order.
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// Creates a new empty todo list.
    pub fn new(id: TodoListId, title: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            username: username.into(),
            todos: Vec::new(),
        }
    }

    /// Sets the todos.
    pub fn with_todos(mut self, todos: Vec<Todo>) -> Self {
        self.todos = todos;
        self
    }

    /// Returns true if the list has at least one todo and every todo is done.
    /// An empty list is never done.
    pub fn is_done(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.done)
    }

    /// Returns true if any todo in the list is still undone.
    pub fn has_undone_todos(&self) -> bool {
        self.todos.iter().any(|todo| !todo.done)
    }

    /// Number of todos not yet done.
    pub fn undone_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.done).count()
    }

    /// Finds a todo by ID.
    pub fn find_todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }
}
