//! Todos Server binary.

use std::net::SocketAddr;

use anyhow::Context;
use auth::UserDirectory;
use main_server::{
    config::{Config, Persistence},
    create_app, create_state, init_tracing,
    state::{SessionRegistry, StoreBackend},
};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(persistence = ?config.persistence, "Starting Todos Server");

    let users = UserDirectory::with_user(&config.admin_username, &config.admin_password)?;

    let backend = match config.persistence {
        Persistence::Session => StoreBackend::Session(SessionRegistry::new()),
        Persistence::Database => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required with database persistence")?;
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .context("failed to connect to database")?;

            todo_store::schema::migrate(&pool).await?;
            for user in users.records() {
                todo_store::schema::ensure_user(&pool, user).await?;
            }
            tracing::info!("Database schema ready");

            StoreBackend::Database(pool)
        }
    };

    let state = create_state(config.clone(), backend, users);
    let app = create_app(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
