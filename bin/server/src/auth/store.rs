//! In-memory session storage.

use luximo_core::SessionId;
use luximo_identity::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Sessions keyed by id, shared across request handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new session.
    pub async fn create(&self, session: Session) {
        self.sessions.write().await.insert(session.id(), session);
    }

    /// Finds a live session by id.
    ///
    /// An expired session is removed and treated as missing.
    pub async fn find_by_id(&self, id: SessionId) -> Option<Session> {
        let session = self.sessions.read().await.get(&id).cloned()?;
        if session.is_valid() {
            return Some(session);
        }
        self.sessions.write().await.remove(&id);
        None
    }

    /// Deletes a session and hands it back, if it existed.
    pub async fn delete(&self, id: SessionId) -> Option<Session> {
        self.sessions.write().await.remove(&id)
    }

    /// Deletes all expired sessions and returns how many were removed.
    pub async fn delete_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        before - sessions.len()
    }

    /// Number of stored sessions, expired ones included.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
