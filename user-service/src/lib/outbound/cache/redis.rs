use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::RedisError;

use crate::user::errors::CacheError;
use crate::user::ports::UserCache;

/// User cache stored in Redis as plain string values.
///
/// The connection manager reconnects on its own after a dropped connection;
/// commands issued meanwhile fail and are treated as misses by callers.
#[derive(Clone)]
pub struct RedisUserCache {
    connection: ConnectionManager,
    ttl_secs: Option<u64>,
}

impl RedisUserCache {
    /// Connect to Redis.
    ///
    /// # Arguments
    /// * `url` - Connection URL, e.g. `redis://localhost:6379`
    /// * `ttl_secs` - Expiry applied to every entry written; `None` keeps entries until deleted
    ///
    /// # Errors
    /// * `ConnectionFailed` - URL is invalid or the server is unreachable
    pub async fn connect(url: &str, ttl_secs: Option<u64>) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::ConnectionFailed(e.to_string()))?;

        let connection = client
            .get_connection_manager()
            .await
            .map_err(|e| CacheError::ConnectionFailed(e.to_string()))?;

        tracing::info!("Connected to Redis user cache");

        Ok(Self {
            connection,
            ttl_secs,
        })
    }
}

fn cache_error(e: RedisError) -> CacheError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() {
        CacheError::ConnectionFailed(e.to_string())
    } else {
        CacheError::CommandFailed(e.to_string())
    }
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut connection = self.connection.clone();

        redis::cmd("GET")
            .arg(key)
            .query_async::<_, Option<String>>(&mut connection)
            .await
            .map_err(cache_error)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();

        let mut command = redis::cmd("SET");
        command.arg(key).arg(value);
        if let Some(ttl) = self.ttl_secs {
            command.arg("EX").arg(ttl);
        }

        command
            .query_async::<_, ()>(&mut connection)
            .await
            .map_err(cache_error)
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();

        redis::cmd("DEL")
            .arg(key)
            .query_async::<_, ()>(&mut connection)
            .await
            .map_err(cache_error)
    }

    async fn reset_all(&self) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();

        redis::cmd("FLUSHDB")
            .query_async::<_, ()>(&mut connection)
            .await
            .map_err(cache_error)
    }
}
