//! Session storage implementations
//!
//! Sessions are stored as JSON blobs keyed by their bearer token, in Redis
//! with a TTL when it is configured and in process memory otherwise.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::Session;
use crate::config::RedisConfig;
use crate::utils::errors::Result;

#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn save(&self, session: &Session) -> Result<()>;
    async fn load(&self, token: &str) -> Result<Option<Session>>;
    /// Returns whether a session was removed
    async fn delete(&self, token: &str) -> Result<bool>;
}

/// Redis-based session storage
#[derive(Clone)]
pub struct RedisSessionStorage {
    connection_manager: redis::aio::ConnectionManager,
    config: RedisConfig,
}

impl RedisSessionStorage {
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    fn session_key(&self, token: &str) -> String {
        format!("{}session:{}", self.config.prefix, token)
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisSessionStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStorage")
            .field("prefix", &self.config.prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionStorage for RedisSessionStorage {
    async fn save(&self, session: &Session) -> Result<()> {
        let key = self.session_key(&session.token);
        let serialized = serde_json::to_string(session)?;

        // Minimum 1 second, SETEX rejects zero
        let ttl_seconds = std::cmp::max((session.expires_at - Utc::now()).num_seconds(), 1) as u64;

        let mut conn = self.connection_manager.clone();
        match conn.set_ex::<_, _, ()>(&key, serialized, ttl_seconds).await {
            Ok(_) => {
                debug!(subject = %session.identity.subject(), ttl_seconds, "Session saved to Redis");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to save session to Redis");
                Err(e.into())
            }
        }
    }

    async fn load(&self, token: &str) -> Result<Option<Session>> {
        let key = self.session_key(token);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;
        let Some(data) = serialized else {
            return Ok(None);
        };

        match serde_json::from_str::<Session>(&data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(error = %e, "Dropping unreadable session blob");
                let _: u32 = conn.del(&key).await?;
                Ok(None)
            }
        }
    }

    async fn delete(&self, token: &str) -> Result<bool> {
        let key = self.session_key(token);
        let mut conn = self.connection_manager.clone();
        let deleted: u32 = conn.del(&key).await?;
        Ok(deleted > 0)
    }
}

/// In-memory session storage used when Redis is not configured
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop expired sessions, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        before - sessions.len()
    }

    /// Spawn a task that purges expired sessions on `interval`
    pub fn spawn_cleanup(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let storage = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let removed = storage.purge_expired().await;
                if removed > 0 {
                    info!("Cleanup task removed {} expired sessions", removed);
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn save(&self, session: &Session) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn load(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn delete(&self, token: &str) -> Result<bool> {
        Ok(self.sessions.write().await.remove(token).is_some())
    }
}
