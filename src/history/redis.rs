use async_trait::async_trait;
use chrono::Utc;
use redis::{ AsyncCommands, Client };
use serde::{ Deserialize, Serialize };
use std::time::Duration;

use super::{ SessionError, SessionStore };
use crate::models::chat::Turn;

#[derive(Serialize, Deserialize)]
struct StoredSession {
    messages: Vec<Turn>,
    updated_at: i64,
}

pub struct RedisSessionStore {
    client: Client,
    key_prefix: String,
    ttl: Duration,
}

impl RedisSessionStore {
    pub fn new(url: &str, key_prefix: String, ttl: Duration) -> Result<Self, SessionError> {
        Ok(Self {
            client: Client::open(url)?,
            key_prefix,
            ttl,
        })
    }

    fn key(&self, session_id: &str) -> String {
        format!("{}{}", self.key_prefix, session_id)
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<Vec<Turn>>, SessionError> {
        let mut conn = self.get_connection().await?;
        let raw: Option<String> = conn.get(self.key(session_id)).await?;
        match raw {
            Some(json) => {
                let stored: StoredSession = serde_json::from_str(&json)?;
                Ok(Some(stored.messages))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, session_id: &str, turns: &[Turn]) -> Result<(), SessionError> {
        let mut conn = self.get_connection().await?;
        let stored = StoredSession {
            messages: turns.to_vec(),
            updated_at: Utc::now().timestamp(),
        };
        let json = serde_json::to_string(&stored)?;
        conn.set_ex::<_, _, ()>(self.key(session_id), json, self.ttl.as_secs()).await?;
        Ok(())
    }
}
