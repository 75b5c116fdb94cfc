//! Session store seam.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Name of the session cookie set on login and token verification.
pub const SESSION_COOKIE: &str = "mapsso_session";

/// The host platform's session machinery, reduced to what the endpoints
/// need. Destroy is idempotent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session for a user and returns its id.
    async fn create(&self, user_id: &str) -> String;

    /// Resolves a session id to its subject.
    async fn subject(&self, session_id: &str) -> Option<String>;

    /// Removes a session. Unknown ids are a no-op.
    async fn destroy(&self, session_id: &str);
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.write().insert(id.clone(), user_id.to_string());
        id
    }

    async fn subject(&self, session_id: &str) -> Option<String> {
        self.sessions.read().get(session_id).cloned()
    }

    async fn destroy(&self, session_id: &str) {
        self.sessions.write().remove(session_id);
    }
}
