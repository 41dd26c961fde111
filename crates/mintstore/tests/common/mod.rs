//! Shared test doubles
#![allow(dead_code)] // not every test binary uses every double

use async_trait::async_trait;
use mintstore::{Error, Result, StoreBackend};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Backend where every operation fails, standing in for an unreachable
/// server. Counts attempts so tests can assert one fresh attempt per call
/// and no retries.
#[derive(Debug, Default)]
pub struct BrokenStore {
    pub attempts: AtomicUsize,
}

impl BrokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::network("connection refused: 127.0.0.1:999999"))
    }
}

#[async_trait]
impl StoreBackend for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>> {
        self.fail()
    }

    async fn set(&self, _key: &str, _value: &Value, _timeout: Option<Duration>) -> Result<()> {
        self.fail()
    }

    async fn add(&self, _key: &str, _value: &Value, _timeout: Option<Duration>) -> Result<bool> {
        self.fail()
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        self.fail()
    }

    async fn incr(&self, _key: &str, _delta: u64) -> Result<Option<i64>> {
        self.fail()
    }

    async fn decr(&self, _key: &str, _delta: u64) -> Result<Option<i64>> {
        self.fail()
    }

    async fn get_many(&self, _keys: &[String]) -> Result<HashMap<String, Value>> {
        self.fail()
    }

    async fn set_many(
        &self,
        _values: &HashMap<String, Value>,
        _timeout: Option<Duration>,
    ) -> Result<()> {
        self.fail()
    }

    async fn delete_many(&self, _keys: &[String]) -> Result<()> {
        self.fail()
    }

    fn backend_name(&self) -> String {
        "broken".to_string()
    }
}

/// Backend whose writes fail while reads delegate to the wrapped store.
/// Models a store that can still serve but rejects new data.
#[derive(Debug)]
pub struct ReadOnlyStore {
    inner: Arc<dyn StoreBackend>,
    pub rejected_writes: AtomicUsize,
}

impl ReadOnlyStore {
    pub fn new(inner: Arc<dyn StoreBackend>) -> Self {
        Self {
            inner,
            rejected_writes: AtomicUsize::new(0),
        }
    }

    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes.load(Ordering::SeqCst)
    }

    fn reject<T>(&self) -> Result<T> {
        self.rejected_writes.fetch_add(1, Ordering::SeqCst);
        Err(Error::backend("write rejected"))
    }
}

#[async_trait]
impl StoreBackend for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &Value, _timeout: Option<Duration>) -> Result<()> {
        self.reject()
    }

    async fn add(&self, _key: &str, _value: &Value, _timeout: Option<Duration>) -> Result<bool> {
        self.reject()
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.inner.delete(key).await
    }

    async fn incr(&self, key: &str, delta: u64) -> Result<Option<i64>> {
        self.inner.incr(key, delta).await
    }

    async fn decr(&self, key: &str, delta: u64) -> Result<Option<i64>> {
        self.inner.decr(key, delta).await
    }

    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Value>> {
        self.inner.get_many(keys).await
    }

    async fn set_many(
        &self,
        _values: &HashMap<String, Value>,
        _timeout: Option<Duration>,
    ) -> Result<()> {
        self.reject()
    }

    async fn delete_many(&self, keys: &[String]) -> Result<()> {
        self.inner.delete_many(keys).await
    }

    fn backend_name(&self) -> String {
        format!("read_only+{}", self.inner.backend_name())
    }
}
