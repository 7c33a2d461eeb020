//! Wire representations of todo lists and todos.

use entities::{Todo, TodoId, TodoList, TodoListId};
use serde::{Deserialize, Serialize};

/// A single todo as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoView {
    pub id: TodoId,
    pub title: String,
    pub done: bool,
}

impl From<&Todo> for TodoView {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            done: todo.done,
        }
    }
}

/// One row of the list overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListSummary {
    pub id: TodoListId,
    pub title: String,
    /// True when the list has at least one todo and all of them are done.
    pub is_done: bool,
    pub todo_count: usize,
    pub undone_count: usize,
}

impl From<&TodoList> for TodoListSummary {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id,
            title: list.title.clone(),
            is_done: list.is_done(),
            todo_count: list.todos.len(),
            undone_count: list.undone_count(),
        }
    }
}

/// A todo list with its todos in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListDetail {
    pub id: TodoListId,
    pub title: String,
    pub is_done: bool,
    pub has_undone_todos: bool,
    pub todos: Vec<TodoView>,
}

impl TodoListDetail {
    /// Builds the detail view; `sorted_todos` is expected to be in display order already.
    pub fn new(list: &TodoList, sorted_todos: &[Todo]) -> Self {
        Self {
            id: list.id,
            title: list.title.clone(),
            is_done: list.is_done(),
            has_undone_todos: list.has_undone_todos(),
            todos: sorted_todos.iter().map(TodoView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let list = TodoList::new(1, "Work", "admin").with_todos(vec![
            Todo::new(2, "a", "admin").with_done(true),
            Todo::new(3, "b", "admin"),
        ]);

        let summary = TodoListSummary::from(&list);
        assert_eq!(summary.todo_count, 2);
        assert_eq!(summary.undone_count, 1);
        assert!(!summary.is_done);
    }

    #[test]
    fn test_detail_keeps_given_order() {
        let list = TodoList::new(1, "Work", "admin");
        let todos = vec![Todo::new(3, "b", "admin"), Todo::new(2, "a", "admin")];

        let detail = TodoListDetail::new(&list, &todos);
        let ids: Vec<_> = detail.todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert!(!detail.is_done);
    }
}
