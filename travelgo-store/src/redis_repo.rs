use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, info};
use travelgo_core::repository::{RepoResult, SessionStore};
use travelgo_core::SessionState;

/// Session storage in Redis: `session:{token}` holds the JSON state and
/// expires `ttl_seconds` after the last write.
#[derive(Clone)]
pub struct RedisSessionStore {
    client: redis::Client,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub async fn new(connection_string: &str, ttl_seconds: u64) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        // Fail fast at start-up rather than on the first request
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        info!("Connected to Redis session store");
        Ok(Self { client, ttl_seconds })
    }

    fn session_key(token: &str) -> String {
        format!("session:{}", token)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, token: &str) -> RepoResult<Option<SessionState>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(Self::session_key(token)).await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, token: &str, session: &SessionState) -> RepoResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(session)?;
        conn.set_ex::<_, _, ()>(Self::session_key(token), json, self.ttl_seconds).await?;
        debug!("Session saved: {}", token);
        Ok(())
    }

    async fn remove(&self, token: &str) -> RepoResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(Self::session_key(token)).await?;
        debug!("Session removed: {}", token);
        Ok(())
    }
}
