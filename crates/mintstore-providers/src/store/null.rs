//! Null store backend for testing
//!
//! A store that doesn't hold anything: every read misses, every write is
//! accepted and discarded. Useful for tests and for disabling caching.

use async_trait::async_trait;
use mintstore_domain::error::Result;
use mintstore_domain::StoreBackend;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Null store backend that doesn't store anything
#[derive(Debug, Clone, Default)]
pub struct NullStore;

impl NullStore {
    /// Create a new null store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StoreBackend for NullStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>> {
        // Always a miss
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &Value, _timeout: Option<Duration>) -> Result<()> {
        // Accept the write but store nothing
        Ok(())
    }

    async fn add(&self, _key: &str, _value: &Value, _timeout: Option<Duration>) -> Result<bool> {
        // The key is never present, so the add always "wins"
        Ok(true)
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn incr(&self, _key: &str, _delta: u64) -> Result<Option<i64>> {
        Ok(None)
    }

    async fn decr(&self, _key: &str, _delta: u64) -> Result<Option<i64>> {
        Ok(None)
    }

    async fn get_many(&self, _keys: &[String]) -> Result<HashMap<String, Value>> {
        Ok(HashMap::new())
    }

    async fn set_many(
        &self,
        _values: &HashMap<String, Value>,
        _timeout: Option<Duration>,
    ) -> Result<()> {
        Ok(())
    }

    async fn delete_many(&self, _keys: &[String]) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> String {
        "null".to_string()
    }
}
