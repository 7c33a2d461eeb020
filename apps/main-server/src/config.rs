//! Server configuration.

use std::env;

use anyhow::Context;

/// Where todo lists are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Per-session in-memory data, seeded with sample lists.
    Session,
    /// PostgreSQL, shared across sessions.
    Database,
}

impl std::str::FromStr for Persistence {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "session" => Ok(Self::Session),
            "database" | "db" | "postgres" => Ok(Self::Database),
            other => anyhow::bail!("unknown TODOS_PERSISTENCE value: {other}"),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Persistence backend.
    pub persistence: Persistence,
    /// Database URL (required with database persistence).
    pub database_url: Option<String>,
    /// JWT secret. Generated per process when absent.
    pub jwt_secret: Option<String>,
    /// Session lifetime in hours.
    pub session_hours: u64,
    /// Username allowed to sign in.
    pub admin_username: String,
    /// Password for `admin_username`.
    pub admin_password: String,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let persistence = match lookup("TODOS_PERSISTENCE") {
            Some(value) => value.parse()?,
            None => Persistence::Session,
        };

        let database_url = lookup("DATABASE_URL");
        let jwt_secret = lookup("TODOS_JWT_SECRET");
        if persistence == Persistence::Database {
            if database_url.is_none() {
                anyhow::bail!("DATABASE_URL is required with database persistence");
            }
            if jwt_secret.is_none() {
                anyhow::bail!("TODOS_JWT_SECRET is required with database persistence");
            }
        }

        let port = match lookup("TODOS_SERVER_PORT") {
            Some(value) => value.parse().context("TODOS_SERVER_PORT must be a port number")?,
            None => 3000,
        };
        let session_hours = match lookup("TODOS_SESSION_HOURS") {
            Some(value) => value
                .parse()
                .context("TODOS_SESSION_HOURS must be a whole number of hours")?,
            None => auth::DEFAULT_SESSION_HOURS,
        };

        Ok(Self {
            host: lookup("TODOS_SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            persistence,
            database_url,
            jwt_secret,
            session_hours,
            admin_username: lookup("TODOS_ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            admin_password: lookup("TODOS_ADMIN_PASSWORD").unwrap_or_else(|| "secret".to_string()),
            log_level: lookup("TODOS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
