//! Redis store backend
//!
//! Distributed implementation of the store port using Redis. Suitable for
//! multi-instance deployments; uses a multiplexed connection for efficient
//! connection reuse. Values are stored as JSON text.

use async_trait::async_trait;
use mintstore_domain::error::{Error, Result};
use mintstore_domain::StoreBackend;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Increment only when the key exists (memcached semantics; a nil reply
/// maps to `None`)
const INCR_SCRIPT: &str = r"
if redis.call('EXISTS', KEYS[1]) == 0 then
    return false
end
return redis.call('INCRBY', KEYS[1], ARGV[1])
";

/// Decrement only when the key exists, flooring at zero without discarding
/// the key's TTL
const DECR_SCRIPT: &str = r"
if redis.call('EXISTS', KEYS[1]) == 0 then
    return false
end
local v = redis.call('DECRBY', KEYS[1], ARGV[1])
if v < 0 then
    redis.call('SET', KEYS[1], 0, 'KEEPTTL')
    return 0
end
return v
";

/// Redis store backend
#[derive(Debug, Clone)]
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    /// Create a new Redis store with a connection string
    ///
    /// # Arguments
    /// * `connection_string` - Redis URL (e.g., `redis://localhost:6379`)
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::configuration_with_source("Failed to create Redis client", e)
        })?;
        Ok(Self { client })
    }

    /// Create a new Redis store with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::network_with_source("Failed to get Redis connection", e))
    }

    fn encode(value: &Value) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode(text: &str) -> Result<Value> {
        Ok(serde_json::from_str(text)?)
    }
}

#[async_trait]
impl StoreBackend for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut conn = self.connection().await?;
        let text: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| Error::backend_with_source("Redis GET failed", e))?;
        text.as_deref().map(Self::decode).transpose()
    }

    async fn set(&self, key: &str, value: &Value, timeout: Option<Duration>) -> Result<()> {
        let mut conn = self.connection().await?;
        let text = Self::encode(value)?;
        let result: redis::RedisResult<()> = match timeout {
            Some(timeout) => conn.set_ex(key, text, timeout.as_secs()).await,
            None => conn.set(key, text).await,
        };
        result.map_err(|e| Error::backend_with_source("Redis SET failed", e))
    }

    async fn add(&self, key: &str, value: &Value, timeout: Option<Duration>) -> Result<bool> {
        let mut conn = self.connection().await?;
        let text = Self::encode(value)?;
        // SET NX [EX]; a Nil reply means the key already existed
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(text).arg("NX");
        if let Some(timeout) = timeout {
            cmd.arg("EX").arg(timeout.as_secs());
        }
        let reply: Option<String> = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::backend_with_source("Redis SET NX failed", e))?;
        Ok(reply.is_some())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| Error::backend_with_source("Redis DEL failed", e))?;
        Ok(deleted > 0)
    }

    async fn incr(&self, key: &str, delta: u64) -> Result<Option<i64>> {
        let mut conn = self.connection().await?;
        let delta = i64::try_from(delta).unwrap_or(i64::MAX);
        let next: Option<i64> = redis::Script::new(INCR_SCRIPT)
            .key(key)
            .arg(delta)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| Error::backend_with_source("Redis INCRBY script failed", e))?;
        Ok(next)
    }

    async fn decr(&self, key: &str, delta: u64) -> Result<Option<i64>> {
        let mut conn = self.connection().await?;
        let delta = i64::try_from(delta).unwrap_or(i64::MAX);
        let next: Option<i64> = redis::Script::new(DECR_SCRIPT)
            .key(key)
            .arg(delta)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| Error::backend_with_source("Redis DECRBY script failed", e))?;
        Ok(next)
    }

    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Value>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.connection().await?;
        // MGET preserves the order of the requested keys
        let texts: Vec<Option<String>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::backend_with_source("Redis MGET failed", e))?;

        let mut result = HashMap::new();
        for (key, text) in keys.iter().zip(texts) {
            if let Some(text) = text {
                result.insert(key.clone(), Self::decode(&text)?);
            }
        }
        Ok(result)
    }

    async fn set_many(
        &self,
        values: &HashMap<String, Value>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        let mut pipe = redis::pipe();
        for (key, value) in values {
            let text = Self::encode(value)?;
            match timeout {
                Some(timeout) => {
                    pipe.set_ex(key, text, timeout.as_secs()).ignore();
                }
                None => {
                    pipe.set(key, text).ignore();
                }
            }
        }
        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| Error::backend_with_source("Redis pipelined SET failed", e))?;
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        let _: i64 = conn
            .del(keys)
            .await
            .map_err(|e| Error::backend_with_source("Redis DEL failed", e))?;
        Ok(())
    }

    fn backend_name(&self) -> String {
        "redis".to_string()
    }
}
