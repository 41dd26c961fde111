//! In-memory store backend
//!
//! In-process implementation of the store port for development and testing.
//! Data is not persisted and is lost on restart.
//!
//! Expiry is computed against an injected [`TimeSource`], so tests can freeze
//! or advance the clock; expired entries are evicted lazily on access.
//! Oversize values are rejected the way memcached rejects them, with a 1 MiB
//! default limit.

use async_trait::async_trait;
use dashmap::DashMap;
use mintstore_domain::config::DEFAULT_MAX_VALUE_BYTES;
use mintstore_domain::error::{Error, Result};
use mintstore_domain::{StoreBackend, SystemClock, TimeSource};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Stored entry with its absolute expiry instant
#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    /// Epoch seconds at which the entry expires; `None` never expires
    expires_at: Option<i64>,
}

impl Entry {
    fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory store backend
///
/// Stores JSON values in a concurrent hash map with per-entry TTL.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, Entry>>,
    clock: Arc<dyn TimeSource>,
    max_value_bytes: usize,
}

impl MemoryStore {
    /// Create a new in-memory store using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Create a new in-memory store with a custom time source
    pub fn with_clock(clock: Arc<dyn TimeSource>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock,
            max_value_bytes: DEFAULT_MAX_VALUE_BYTES,
        }
    }

    /// Set the maximum accepted value size in bytes
    pub fn with_max_value_bytes(mut self, max_value_bytes: usize) -> Self {
        self.max_value_bytes = max_value_bytes;
        self
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        let now = self.clock.now_epoch_secs();
        self.entries.iter().filter(|e| !e.is_expired(now)).count()
    }

    /// Whether the store holds no live entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expiry_for(&self, timeout: Option<Duration>) -> Option<i64> {
        timeout.map(|t| {
            let span = i64::try_from(t.as_secs()).unwrap_or(i64::MAX);
            self.clock.now_epoch_secs().saturating_add(span)
        })
    }

    fn check_size(&self, key: &str, value: &Value) -> Result<()> {
        let size = serde_json::to_string(value)?.len();
        if size > self.max_value_bytes {
            return Err(Error::ValueTooLarge {
                key: key.to_string(),
                size,
                limit: self.max_value_bytes,
            });
        }
        Ok(())
    }

    /// Fetch a live entry, evicting it if it has expired
    fn live_entry(&self, key: &str) -> Option<Entry> {
        let now = self.clock.now_epoch_secs();
        // Clone out of the guard before any removal; holding a shard ref
        // across remove_if would deadlock.
        let entry = self.entries.get(key).map(|e| e.clone())?;
        if entry.is_expired(now) {
            self.entries.remove_if(key, |_, e| e.is_expired(now));
            return None;
        }
        Some(entry)
    }

    /// Apply a counter delta to a live entry
    fn apply_delta(&self, key: &str, delta: i64) -> Result<Option<i64>> {
        let now = self.clock.now_epoch_secs();
        self.entries.remove_if(key, |_, e| e.is_expired(now));

        let Some(mut entry) = self.entries.get_mut(key) else {
            return Ok(None);
        };
        let current = entry.value.as_i64().ok_or_else(|| {
            Error::invalid_argument(format!("value at '{key}' is not a counter"))
        })?;
        let next = if delta >= 0 {
            current.saturating_add(delta)
        } else {
            // decrement floors at zero, matching memcached
            current.saturating_add(delta).max(0)
        };
        entry.value = Value::from(next);
        Ok(Some(next))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreBackend for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.live_entry(key).map(|e| e.value))
    }

    async fn set(&self, key: &str, value: &Value, timeout: Option<Duration>) -> Result<()> {
        self.check_size(key, value)?;
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.clone(),
                expires_at: self.expiry_for(timeout),
            },
        );
        Ok(())
    }

    async fn add(&self, key: &str, value: &Value, timeout: Option<Duration>) -> Result<bool> {
        self.check_size(key, value)?;
        if self.live_entry(key).is_some() {
            return Ok(false);
        }
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.clone(),
                expires_at: self.expiry_for(timeout),
            },
        );
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let was_live = self.live_entry(key).is_some();
        self.entries.remove(key);
        Ok(was_live)
    }

    async fn incr(&self, key: &str, delta: u64) -> Result<Option<i64>> {
        let delta = i64::try_from(delta).unwrap_or(i64::MAX);
        self.apply_delta(key, delta)
    }

    async fn decr(&self, key: &str, delta: u64) -> Result<Option<i64>> {
        let delta = i64::try_from(delta).unwrap_or(i64::MAX);
        self.apply_delta(key, -delta)
    }

    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Value>> {
        let mut result = HashMap::new();
        for key in keys {
            if let Some(entry) = self.live_entry(key) {
                result.insert(key.clone(), entry.value);
            }
        }
        Ok(result)
    }

    async fn set_many(
        &self,
        values: &HashMap<String, Value>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        for (key, value) in values {
            self.set(key, value, timeout).await?;
        }
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            self.entries.remove(key);
        }
        Ok(())
    }

    fn backend_name(&self) -> String {
        "memory".to_string()
    }
}
