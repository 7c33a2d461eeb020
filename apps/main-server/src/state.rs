//! Application state.

use std::collections::HashMap;
use std::sync::Arc;

use auth::{JwtManager, UserDirectory};
use chrono::Utc;
use sqlx::PgPool;
use todo_store::{PgTodoStore, SessionData, SessionTodoStore, TodoStore};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::config::Config;
use crate::middleware::CurrentUser;

/// Handles to one session's in-memory state.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    /// The session's todo lists.
    pub data: Arc<RwLock<SessionData>>,
    /// Held across a title check and the write that depends on it.
    pub title_lock: Arc<Mutex<()>>,
}

#[derive(Debug)]
struct SessionEntry {
    handle: SessionHandle,
    /// Unix timestamp after which the session's token is no longer accepted.
    expires_at: i64,
}

/// In-memory todo data for every live session, keyed by session ID.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a session's handles, seeding its data on first use.
    ///
    /// Seeding a new session also drops every session whose token has expired.
    pub async fn get_or_seed(&self, session_id: &str, expires_at: i64) -> SessionHandle {
        {
            let sessions = self.sessions.read().await;
            if let Some(entry) = sessions.get(session_id) {
                return entry.handle.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(session_id) {
            Self::prune_expired(&mut sessions, Utc::now().timestamp());
        }
        let entry = sessions.entry(session_id.to_string()).or_insert_with(|| {
            tracing::debug!(session_id, "Seeding new session");
            SessionEntry {
                handle: SessionHandle {
                    data: SessionData::seeded().shared(),
                    title_lock: Arc::new(Mutex::new(())),
                },
                expires_at,
            }
        });
        entry.handle.clone()
    }

    fn prune_expired(sessions: &mut HashMap<String, SessionEntry>, now: i64) {
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        let dropped = before - sessions.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Dropped expired sessions");
        }
    }

    /// Drops a session's data. Returns true if the session existed.
    pub async fn remove(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no session holds data.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Persistence backend chosen at startup.
#[derive(Debug)]
pub enum StoreBackend {
    /// Per-session in-memory data.
    Session(SessionRegistry),
    /// Shared PostgreSQL database.
    Database(PgPool),
}

/// Shared application state.
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// Persistence backend.
    pub backend: StoreBackend,
    /// Users allowed to sign in with session persistence.
    pub users: Arc<UserDirectory>,
    /// JWT manager.
    pub jwt_manager: JwtManager,
}

impl AppState {
    /// Creates new application state.
    pub fn new(
        config: Config,
        backend: StoreBackend,
        users: UserDirectory,
        jwt_manager: JwtManager,
    ) -> Self {
        Self {
            config,
            backend,
            users: Arc::new(users),
            jwt_manager,
        }
    }

    /// Returns a store scoped to the signed-in user and their session.
    pub async fn store_for(&self, user: &CurrentUser) -> Box<dyn TodoStore> {
        match &self.backend {
            StoreBackend::Session(registry) => {
                let handle = registry.get_or_seed(&user.session_id, user.expires_at).await;
                Box::new(SessionTodoStore::new(
                    handle.data,
                    user.username.clone(),
                    Arc::clone(&self.users),
                ))
            }
            StoreBackend::Database(pool) => {
                Box::new(PgTodoStore::new(pool.clone(), user.username.clone()))
            }
        }
    }

    /// Serializes title checks with the writes that depend on them.
    ///
    /// The database enforces unique titles itself, so only session
    /// persistence needs a guard.
    pub async fn title_guard(&self, user: &CurrentUser) -> Option<OwnedMutexGuard<()>> {
        match &self.backend {
            StoreBackend::Session(registry) => {
                let handle = registry.get_or_seed(&user.session_id, user.expires_at).await;
                Some(handle.title_lock.lock_owned().await)
            }
            StoreBackend::Database(_) => None,
        }
    }

    /// Returns a store that can check credentials before any session exists.
    pub fn credentials_store(&self, username: &str) -> Box<dyn TodoStore> {
        match &self.backend {
            StoreBackend::Session(_) => Box::new(SessionTodoStore::new(
                SessionData::empty().shared(),
                username,
                Arc::clone(&self.users),
            )),
            StoreBackend::Database(pool) => Box::new(PgTodoStore::new(pool.clone(), username)),
        }
    }

    /// Discards whatever the backend keeps for a session.
    pub async fn end_session(&self, session_id: &str) {
        if let StoreBackend::Session(registry) = &self.backend {
            if registry.remove(session_id).await {
                tracing::debug!(session_id, "Session data dropped");
            }
        }
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;

    fn in_one_hour() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[tokio::test]
    async fn test_registry_seeds_once_per_session() {
        let registry = SessionRegistry::new();

        let first = registry.get_or_seed("a", in_one_hour()).await;
        *first.data.write().await = SessionData::empty();

        let again = registry.get_or_seed("a", in_one_hour()).await;
        assert!(again.data.read().await.is_empty());
        assert!(Arc::ptr_eq(&first.title_lock, &again.title_lock));

        let other = registry.get_or_seed("b", in_one_hour()).await;
        assert_eq!(other.data.read().await.len(), 4);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_registry_remove() {
        let registry = SessionRegistry::new();
        registry.get_or_seed("a", in_one_hour()).await;

        assert!(registry.remove("a").await);
        assert!(!registry.remove("a").await);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_sessions_dropped_on_new_session() {
        let registry = SessionRegistry::new();
        let expired = Utc::now().timestamp() - 1;
        for i in 0..50 {
            registry.get_or_seed(&format!("old-{i}"), expired).await;
        }
        registry.get_or_seed("live", in_one_hour()).await;

        assert_eq!(registry.len().await, 1);

        registry.get_or_seed("fresh", in_one_hour()).await;
        assert_eq!(registry.len().await, 2);
    }
}
