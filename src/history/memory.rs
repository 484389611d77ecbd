use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::{ SessionError, SessionStore };
use crate::models::chat::Turn;

struct Entry {
    saved_at: Instant,
    turns: Vec<Turn>,
}

/// Process-local store. Entries older than `ttl` are treated as absent and
/// are dropped on the next write.
pub struct MemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, sessions: RwLock::new(HashMap::new()) }
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.saved_at) < self.ttl
    }

    #[cfg(test)]
    async fn entry_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<Vec<Turn>>, SessionError> {
        let now = Instant::now();
        Ok(
            self.sessions
                .read().await
                .get(session_id)
                .filter(|entry| self.is_live(entry, now))
                .map(|entry| entry.turns.clone())
        )
    }

    async fn save(&self, session_id: &str, turns: &[Turn]) -> Result<(), SessionError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| self.is_live(entry, now));
        sessions.insert(session_id.to_string(), Entry { saved_at: now, turns: turns.to_vec() });
        Ok(())
    }
}
