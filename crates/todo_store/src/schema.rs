//! PostgreSQL schema and bootstrap helpers.

use entities::UserRecord;
use sqlx::PgPool;

use crate::TodoStoreResult;

/// Schema for the database-backed store. Every statement is idempotent.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS todolists (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    username TEXT NOT NULL,
    UNIQUE (title, username)
);

CREATE TABLE IF NOT EXISTS todos (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    done BOOLEAN NOT NULL DEFAULT false,
    todolist_id INTEGER NOT NULL REFERENCES todolists (id) ON DELETE CASCADE,
    username TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_todolists_username ON todolists (username);
CREATE INDEX IF NOT EXISTS idx_todos_todolist_id ON todos (todolist_id);
"#;

/// Creates the tables if they do not exist yet.
pub async fn migrate(pool: &PgPool) -> TodoStoreResult<()> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    tracing::info!("Database schema is up to date");
    Ok(())
}

/// Inserts a user, or replaces the stored password hash if the user exists.
pub async fn ensure_user(pool: &PgPool, user: &UserRecord) -> TodoStoreResult<()> {
    sqlx::query(
        "INSERT INTO users (username, password) VALUES ($1, $2)
         ON CONFLICT (username) DO UPDATE SET password = EXCLUDED.password",
    )
    .bind(&user.username)
    .bind(&user.password_hash)
    .execute(pool)
    .await?;

    tracing::info!(username = %user.username, "Ensured user record");
    Ok(())
}
