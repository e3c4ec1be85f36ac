use crate::session::Session;
use holiday_core::config::SessionConfig;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

/// Sessions by id, created on first use.
///
/// Bounded: the least recently used sessions are evicted past `max_sessions`,
/// and a session untouched for `idle_ttl` is dropped.
pub struct SessionStore {
    sessions: Cache<String, Session>,
}

impl SessionStore {
    pub fn new(max_sessions: u64, idle_ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(max_sessions)
                .time_to_idle(idle_ttl)
                .build(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.max_sessions, Duration::from_secs(config.idle_ttl_secs))
    }

    pub async fn get_or_create(&self, id: &str) -> Session {
        self.sessions
            .get_with(id.to_string(), async {
                debug!(session_id = id, "Creating session");
                Session::new(id)
            })
            .await
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.get(id).await
    }

    pub async fn remove(&self, id: &str) -> Option<Session> {
        let removed = self.sessions.remove(id).await;
        if removed.is_some() {
            debug!(session_id = id, "Removed session");
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub async fn len(&self) -> u64 {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}
