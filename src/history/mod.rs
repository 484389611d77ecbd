mod memory;
mod redis;

pub use memory::MemorySessionStore;
pub use self::redis::RedisSessionStore;

use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use thiserror::Error;

use crate::cli::SessionStoreType;
use crate::config::SessionSettings;
use crate::models::chat::Turn;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store error: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("session data could not be (de)serialised: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Host-side storage of conversation histories, keyed by session id. Each
/// request loads once and saves once; concurrent writers to the same
/// session are last-write-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> Result<Option<Vec<Turn>>, SessionError>;

    async fn save(&self, session_id: &str, turns: &[Turn]) -> Result<(), SessionError>;
}

pub fn create_session_store(
    settings: &SessionSettings
) -> Result<Arc<dyn SessionStore>, SessionError> {
    match settings.store {
        SessionStoreType::Memory => Ok(Arc::new(MemorySessionStore::new(settings.ttl))),
        SessionStoreType::Redis => {
            let store = RedisSessionStore::new(
                &settings.redis_url,
                settings.redis_prefix.clone(),
                settings.ttl
            )?;
            Ok(Arc::new(store))
        }
    }
}

pub fn initialize_session_store(
    settings: &SessionSettings
) -> Result<Arc<dyn SessionStore>, SessionError> {
    match settings.store {
        SessionStoreType::Memory => info!("Chat sessions will be stored in process memory"),
        SessionStoreType::Redis => info!("Chat sessions will be stored in redis at {}", settings.redis_url),
    }
    create_session_store(settings)
}
