//! Session storage
//!
//! The store hands out one lockable handle per sender. Holding the lock for
//! the whole read-transition-write cycle serializes deliveries from the same
//! sender while different senders proceed in parallel.

use super::Session;
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// Shared, lockable session of one sender
pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[allow(dead_code)] // Only raised by external stores
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for conversation sessions, keyed by sender identity
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Existing session of `sender`, or a fresh one at `Init`
    async fn get_or_create(&self, sender: &str) -> Result<SessionHandle, StoreError>;

    /// Write back a session after it was handled
    async fn save(&self, sender: &str, session: &Session) -> Result<(), StoreError>;

    /// Number of senders with a session
    async fn session_count(&self) -> usize;

    /// Idle time after which a session restarts
    fn idle_timeout(&self) -> TimeDelta;

    /// Restart `session` if it has been idle longer than the timeout
    fn reset_if_stale(&self, session: &mut Session) -> bool {
        session.reset_if_stale(Utc::now(), self.idle_timeout())
    }
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn get_or_create(&self, sender: &str) -> Result<SessionHandle, StoreError> {
        (**self).get_or_create(sender).await
    }

    async fn save(&self, sender: &str, session: &Session) -> Result<(), StoreError> {
        (**self).save(sender, session).await
    }

    async fn session_count(&self) -> usize {
        (**self).session_count().await
    }

    fn idle_timeout(&self) -> TimeDelta {
        (**self).idle_timeout()
    }

    fn reset_if_stale(&self, session: &mut Session) -> bool {
        (**self).reset_if_stale(session)
    }
}

/// Process-lifetime, in-memory session map
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
    idle_timeout: TimeDelta,
}

impl InMemorySessionStore {
    pub fn new(idle_timeout: TimeDelta) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, sender: &str) -> Result<SessionHandle, StoreError> {
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(sender) {
                return Ok(handle.clone());
            }
        }

        // Another delivery may have created it between the two locks
        let mut sessions = self.sessions.write().await;
        let handle = sessions
            .entry(sender.to_string())
            .or_insert_with(|| {
                tracing::debug!(sender = %sender, "Creating session");
                Arc::new(Mutex::new(Session::new(Utc::now())))
            })
            .clone();
        Ok(handle)
    }

    async fn save(&self, _sender: &str, _session: &Session) -> Result<(), StoreError> {
        // Handles are shared, mutations are already visible
        Ok(())
    }

    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn idle_timeout(&self) -> TimeDelta {
        self.idle_timeout
    }
}
