//! Fault-tolerant store decorator
//!
//! Makes every store operation total: a failure of the wrapped backend never
//! surfaces to the caller. Each failing call is logged once at error level
//! with the operation name, its arguments, and the failure detail, then
//! resolved to the operation's neutral result - the same shape a miss or a
//! no-op would have produced.
//!
//! There is no retry, backoff, or circuit breaking. Every call attempts the
//! backend fresh; callers must treat wrapped write results as
//! non-authoritative.

use async_trait::async_trait;
use mintstore_domain::error::Result;
use mintstore_domain::StoreBackend;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

/// Fault-tolerant decorator over a store backend
#[derive(Debug, Clone)]
pub struct FaultTolerantStore {
    inner: Arc<dyn StoreBackend>,
}

impl FaultTolerantStore {
    /// Wrap a backend so its failures resolve to neutral results
    pub fn new(inner: Arc<dyn StoreBackend>) -> Self {
        Self { inner }
    }

    /// The wrapped backend
    pub fn inner(&self) -> &Arc<dyn StoreBackend> {
        &self.inner
    }
}

#[async_trait]
impl StoreBackend for FaultTolerantStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        match self.inner.get(key).await {
            Ok(value) => Ok(value),
            Err(err) => {
                error!(op = "get", key, error = %err, "store operation failed");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &Value, timeout: Option<Duration>) -> Result<()> {
        match self.inner.set(key, value, timeout).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(op = "set", key, ?value, ?timeout, error = %err, "store operation failed");
                Ok(())
            }
        }
    }

    async fn add(&self, key: &str, value: &Value, timeout: Option<Duration>) -> Result<bool> {
        match self.inner.add(key, value, timeout).await {
            Ok(stored) => Ok(stored),
            Err(err) => {
                error!(op = "add", key, ?value, ?timeout, error = %err, "store operation failed");
                Ok(false)
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        match self.inner.delete(key).await {
            Ok(deleted) => Ok(deleted),
            Err(err) => {
                error!(op = "delete", key, error = %err, "store operation failed");
                Ok(false)
            }
        }
    }

    async fn incr(&self, key: &str, delta: u64) -> Result<Option<i64>> {
        match self.inner.incr(key, delta).await {
            Ok(next) => Ok(next),
            Err(err) => {
                error!(op = "incr", key, delta, error = %err, "store operation failed");
                Ok(None)
            }
        }
    }

    async fn decr(&self, key: &str, delta: u64) -> Result<Option<i64>> {
        match self.inner.decr(key, delta).await {
            Ok(next) => Ok(next),
            Err(err) => {
                error!(op = "decr", key, delta, error = %err, "store operation failed");
                Ok(None)
            }
        }
    }

    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Value>> {
        match self.inner.get_many(keys).await {
            Ok(values) => Ok(values),
            Err(err) => {
                error!(op = "get_many", ?keys, error = %err, "store operation failed");
                Ok(HashMap::new())
            }
        }
    }

    async fn set_many(
        &self,
        values: &HashMap<String, Value>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        match self.inner.set_many(values, timeout).await {
            Ok(()) => Ok(()),
            Err(err) => {
                let keys: Vec<&String> = values.keys().collect();
                error!(op = "set_many", ?keys, ?timeout, error = %err, "store operation failed");
                Ok(())
            }
        }
    }

    async fn delete_many(&self, keys: &[String]) -> Result<()> {
        match self.inner.delete_many(keys).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(op = "delete_many", ?keys, error = %err, "store operation failed");
                Ok(())
            }
        }
    }

    fn backend_name(&self) -> String {
        format!("fault_tolerant+{}", self.inner.backend_name())
    }
}
