use std::{collections::HashMap, sync::Arc};

use futures::future::BoxFuture;
use redis::{aio::ConnectionManager, AsyncCommands};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::session::Session,
};

/// Maps session ids to logged-in sessions.
pub trait SessionStore: Send + Sync {
    /// Stores `session` under `id` for `ttl_secs` seconds.
    fn create(&self, id: Uuid, session: Session, ttl_secs: u64) -> BoxFuture<'_, Result<()>>;

    /// Looks up a session. Expired sessions may still be returned; callers check.
    fn get(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Session>>>;

    /// Removes a session. Removing an unknown id is not an error.
    fn destroy(&self, id: Uuid) -> BoxFuture<'_, Result<()>>;
}

fn session_key(id: Uuid) -> String {
    format!("session:{}", id)
}

/// `SessionStore` keeping JSON-encoded sessions in Redis with a TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis: ConnectionManager,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;
        Ok(Self { redis })
    }
}

impl SessionStore for RedisSessionStore {
    fn create(&self, id: Uuid, session: Session, ttl_secs: u64) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let session_json = sonic_rs::to_string(&session)
                .map_err(|e| AppError::Internal(format!("Session serialization failed: {}", e)))?;

            let mut redis = self.redis.clone();
            let _: () = redis
                .set_ex(session_key(id), &session_json, ttl_secs)
                .await
                .map_err(|e| {
                    tracing::error!("❌ Redis set_ex failed: {}", e);
                    AppError::Redis(e)
                })?;

            tracing::debug!("✅ Session saved to Redis: session:{}", id);
            Ok(())
        })
    }

    fn get(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Session>>> {
        Box::pin(async move {
            let mut redis = self.redis.clone();
            let session_json: Option<String> = redis.get(session_key(id)).await?;

            match session_json {
                Some(json) => match sonic_rs::from_str::<Session>(&json) {
                    Ok(session) => Ok(Some(session)),
                    Err(e) => {
                        tracing::warn!("❌ Invalid session JSON for {}: {}", id, e);
                        Ok(None)
                    }
                },
                None => Ok(None),
            }
        })
    }

    fn destroy(&self, id: Uuid) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let mut redis = self.redis.clone();
            let _: () = redis.del(session_key(id)).await?;
            tracing::debug!("✅ Session deleted from Redis: session:{}", id);
            Ok(())
        })
    }
}

/// In-process `SessionStore`; sessions are lost on restart.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries, expired or not.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

impl SessionStore for MemorySessionStore {
    fn create(&self, id: Uuid, session: Session, _ttl_secs: u64) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let mut sessions = self.sessions.lock().await;
            sessions.retain(|_, stored| !stored.is_expired());
            sessions.insert(id, session);
            Ok(())
        })
    }

    fn get(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Session>>> {
        Box::pin(async move { Ok(self.sessions.lock().await.get(&id).cloned()) })
    }

    fn destroy(&self, id: Uuid) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.sessions.lock().await.remove(&id);
            Ok(())
        })
    }
}
