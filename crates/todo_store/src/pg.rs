//! PostgreSQL-backed todo store.

use std::collections::HashMap;

use async_trait::async_trait;
use entities::{Todo, TodoId, TodoList, TodoListId};
use sqlx::PgPool;

use crate::{
    is_unique_violation, sort::sort_by_completion, TodoStore, TodoStoreError, TodoStoreResult,
};

/// Row in the `todolists` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct TodoListRow {
    id: i32,
    title: String,
    username: String,
}

/// Row in the `todos` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct TodoRow {
    id: i32,
    title: String,
    done: bool,
    todolist_id: i32,
    username: String,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo::new(row.id, row.title, row.username).with_done(row.done)
    }
}

/// Joins todo rows onto their lists by list ID, keeping both input orders.
fn attach_todos(lists: Vec<TodoListRow>, todos: Vec<TodoRow>) -> Vec<TodoList> {
    let mut by_list: HashMap<i32, Vec<Todo>> = HashMap::new();
    for row in todos {
        by_list.entry(row.todolist_id).or_default().push(row.into());
    }

    lists
        .into_iter()
        .map(|list| {
            let todos = by_list.remove(&list.id).unwrap_or_default();
            TodoList::new(list.id, list.title, list.username).with_todos(todos)
        })
        .collect()
}

/// Todo store backed by PostgreSQL.
///
/// Holds no state besides the pool and the username; every statement is
/// filtered by the username so other users' rows are never touched.
#[derive(Debug, Clone)]
pub struct PgTodoStore {
    pool: PgPool,
    username: String,
}

impl PgTodoStore {
    /// Creates a store bound to `username`.
    pub fn new(pool: PgPool, username: impl Into<String>) -> Self {
        Self {
            pool,
            username: username.into(),
        }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    fn username(&self) -> &str {
        &self.username
    }

    // =========================================================================
    // Todo list operations
    // =========================================================================

    async fn create_todo_list(&self, title: &str) -> TodoStoreResult<bool> {
        let result = sqlx::query("INSERT INTO todolists (title, username) VALUES ($1, $2)")
            .bind(title)
            .bind(&self.username)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() == 1),
            Err(e) => {
                let error = TodoStoreError::from(e);
                if self.is_unique_constraint_violation(&error) {
                    tracing::info!(title, "Todo list title already taken");
                    return Ok(false);
                }
                Err(error)
            }
        }
    }

    async fn delete_todo_list(&self, list_id: TodoListId) -> TodoStoreResult<bool> {
        let result = sqlx::query("DELETE FROM todolists WHERE id = $1 AND username = $2")
            .bind(list_id)
            .bind(&self.username)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_todo_list_title(
        &self,
        list_id: TodoListId,
        title: &str,
    ) -> TodoStoreResult<bool> {
        let result =
            sqlx::query("UPDATE todolists SET title = $1 WHERE id = $2 AND username = $3")
                .bind(title)
                .bind(list_id)
                .bind(&self.username)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn complete_all_todos(&self, list_id: TodoListId) -> TodoStoreResult<bool> {
        // The CTE runs even though its output is unused.
        let list_exists: bool = sqlx::query_scalar(
            "WITH completed AS (
                 UPDATE todos SET done = true
                  WHERE todolist_id = $1 AND username = $2 AND NOT done
             )
             SELECT EXISTS (SELECT 1 FROM todolists WHERE id = $1 AND username = $2)",
        )
        .bind(list_id)
        .bind(&self.username)
        .fetch_one(&self.pool)
        .await?;

        Ok(list_exists)
    }

    async fn load_todo_list(&self, list_id: TodoListId) -> TodoStoreResult<Option<TodoList>> {
        let list_query = sqlx::query_as::<_, TodoListRow>(
            "SELECT id, title, username FROM todolists WHERE id = $1 AND username = $2",
        )
        .bind(list_id)
        .bind(&self.username)
        .fetch_optional(&self.pool);

        let todos_query = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, done, todolist_id, username FROM todos
             WHERE todolist_id = $1 AND username = $2
             ORDER BY id",
        )
        .bind(list_id)
        .bind(&self.username)
        .fetch_all(&self.pool);

        let (list, todos) = tokio::try_join!(list_query, todos_query)?;

        Ok(list.and_then(|list| attach_todos(vec![list], todos).pop()))
    }

    async fn exists_todo_list_title(&self, title: &str) -> TodoStoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM todolists WHERE title = $1 AND username = $2)",
        )
        .bind(title)
        .bind(&self.username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn sorted_todo_lists(&self) -> TodoStoreResult<Vec<TodoList>> {
        let lists_query = sqlx::query_as::<_, TodoListRow>(
            "SELECT id, title, username FROM todolists
             WHERE username = $1
             ORDER BY lower(title) ASC, id ASC",
        )
        .bind(&self.username)
        .fetch_all(&self.pool);

        let todos_query = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, done, todolist_id, username FROM todos
             WHERE username = $1
             ORDER BY id",
        )
        .bind(&self.username)
        .fetch_all(&self.pool);

        let (lists, todos) = tokio::try_join!(lists_query, todos_query)?;

        // Database collation may disagree with Rust lowercasing; the shared rule decides.
        Ok(sort_by_completion(attach_todos(lists, todos)))
    }

    // =========================================================================
    // Todo operations
    // =========================================================================

    async fn create_todo(&self, list_id: TodoListId, title: &str) -> TodoStoreResult<bool> {
        let result = sqlx::query(
            "INSERT INTO todos (title, todolist_id, username)
             SELECT $1, id, username FROM todolists WHERE id = $2 AND username = $3",
        )
        .bind(title)
        .bind(list_id)
        .bind(&self.username)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_todo(&self, list_id: TodoListId, todo_id: TodoId) -> TodoStoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM todos WHERE todolist_id = $1 AND id = $2 AND username = $3")
                .bind(list_id)
                .bind(todo_id)
                .bind(&self.username)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn toggle_done_todo(
        &self,
        list_id: TodoListId,
        todo_id: TodoId,
    ) -> TodoStoreResult<bool> {
        let result = sqlx::query(
            "UPDATE todos SET done = NOT done
             WHERE todolist_id = $1 AND id = $2 AND username = $3",
        )
        .bind(list_id)
        .bind(todo_id)
        .bind(&self.username)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn load_todo(
        &self,
        list_id: TodoListId,
        todo_id: TodoId,
    ) -> TodoStoreResult<Option<Todo>> {
        let row: Option<TodoRow> = sqlx::query_as(
            "SELECT id, title, done, todolist_id, username FROM todos
             WHERE todolist_id = $1 AND id = $2 AND username = $3",
        )
        .bind(list_id)
        .bind(todo_id)
        .bind(&self.username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn sorted_todos(&self, list: &TodoList) -> TodoStoreResult<Vec<Todo>> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, title, done, todolist_id, username FROM todos
             WHERE todolist_id = $1 AND username = $2
             ORDER BY done ASC, lower(title) ASC, id ASC",
        )
        .bind(list.id)
        .bind(&self.username)
        .fetch_all(&self.pool)
        .await?;

        Ok(sort_by_completion(rows.into_iter().map(Todo::from).collect()))
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    async fn valid_credentials(&self, username: &str, password: &str) -> TodoStoreResult<bool> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT password FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        match hash {
            Some(hash) => Ok(auth::verify_password(password, &hash)?),
            None => Ok(false),
        }
    }

    fn is_unique_constraint_violation(&self, error: &TodoStoreError) -> bool {
        match error {
            TodoStoreError::Database(e) => is_unique_violation(e),
            _ => false,
        }
    }
}
