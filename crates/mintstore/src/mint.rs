//! Mint cache decorator
//!
//! Thundering-herd mitigation by decoupling logical from physical expiry.
//! Writes pack the caller's value together with a soft-expiry instant and
//! extend the physical TTL by the herd grace window. On read, a soft-expired
//! entry turns into a deliberate miss for the first reader, which re-arms the
//! entry (same stale payload, raw, TTL = herd window) so every other reader
//! keeps getting hits while that one reader regenerates the value.
//!
//! The election is best-effort: concurrent readers can race on the same
//! soft-expired key and each re-arm it. Last write wins; the grace window
//! bounds how often that can recur per key.

use async_trait::async_trait;
use mintstore_domain::error::Result;
use mintstore_domain::{StoreBackend, SystemClock, TimeSource};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::DEFAULT_HERD_TIMEOUT;

/// Marker tag identifying values written by the mint layer
///
/// Versioned so the packed shape can evolve without misreading old entries.
/// A raw value only collides with this if it carries the exact packed field
/// shape *and* this string; callers storing such values must bypass packing
/// with [`MintStore::set_with`] and `herd = false`.
pub const HERD_MARKER: &str = "mintstore/herd.v1";

/// Packed record stored in place of a raw value when herd protection is on
#[derive(Debug, Clone, Serialize)]
struct PackedValue {
    marker: String,
    payload: Value,
    /// Epoch seconds after which the payload is logically stale
    stale_at: i64,
}

/// Mint cache decorator over a store backend
///
/// Implements the full [`StoreBackend`] port; trait writes default to herd
/// protection, [`MintStore::set_with`] and [`MintStore::set_many_with`]
/// expose the bypass used for re-arm writes and for caller opt-out.
#[derive(Debug, Clone)]
pub struct MintStore {
    inner: Arc<dyn StoreBackend>,
    herd_timeout: Duration,
    clock: Arc<dyn TimeSource>,
}

impl MintStore {
    /// Create a mint decorator with the default 60s grace window
    pub fn new(inner: Arc<dyn StoreBackend>) -> Self {
        Self {
            inner,
            herd_timeout: DEFAULT_HERD_TIMEOUT,
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// Set the herd grace window
    pub fn with_herd_timeout(mut self, herd_timeout: Duration) -> Self {
        self.herd_timeout = herd_timeout;
        self
    }

    /// Set the time source used for soft-expiry decisions
    pub fn with_clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// The configured herd grace window
    pub fn herd_timeout(&self) -> Duration {
        self.herd_timeout
    }

    fn pack(&self, value: &Value, timeout: Duration) -> Result<Value> {
        let span = i64::try_from(timeout.as_secs()).unwrap_or(i64::MAX);
        let packed = PackedValue {
            marker: HERD_MARKER.to_string(),
            payload: value.clone(),
            stale_at: self.clock.now_epoch_secs().saturating_add(span),
        };
        Ok(serde_json::to_value(packed)?)
    }

    /// Exactly the three packed fields, with the marker and an integer
    /// soft-expiry instant; anything else is caller data.
    fn looks_packed(stored: &Value) -> bool {
        let Some(obj) = stored.as_object() else {
            return false;
        };
        obj.len() == 3
            && obj.get("marker").and_then(Value::as_str) == Some(HERD_MARKER)
            && obj.contains_key("payload")
            && obj.get("stale_at").is_some_and(Value::is_i64)
    }

    /// Classify a stored value: packed values come back as their payload with
    /// a refresh flag, anything else passes through unchanged.
    fn unpack(stored: Value, now: i64) -> (Value, bool) {
        if !Self::looks_packed(&stored) {
            return (stored, false);
        }
        match stored {
            Value::Object(mut obj) => {
                let stale_at = obj.get("stale_at").and_then(Value::as_i64).unwrap_or(0);
                let payload = obj.remove("payload").unwrap_or(Value::Null);
                (payload, stale_at < now)
            }
            other => (other, false),
        }
    }

    /// Timeouts that actually expire; zero behaves like "don't herd"
    fn herdable(timeout: Option<Duration>) -> Option<Duration> {
        timeout.filter(|t| !t.is_zero())
    }

    /// Write with an explicit herd decision
    ///
    /// With `herd = true` and a finite positive timeout, the value is packed
    /// and the physical TTL extended by the grace window. Otherwise the raw
    /// value is written with the timeout as given.
    pub async fn set_with(
        &self,
        key: &str,
        value: &Value,
        timeout: Option<Duration>,
        herd: bool,
    ) -> Result<()> {
        match Self::herdable(timeout) {
            Some(timeout) if herd => {
                let packed = self.pack(value, timeout)?;
                self.inner
                    .set(key, &packed, Some(timeout.saturating_add(self.herd_timeout)))
                    .await
            }
            _ => self.inner.set(key, value, timeout).await,
        }
    }

    /// Batch write with an explicit herd decision
    pub async fn set_many_with(
        &self,
        values: &HashMap<String, Value>,
        timeout: Option<Duration>,
        herd: bool,
    ) -> Result<()> {
        match Self::herdable(timeout) {
            Some(timeout) if herd => {
                let mut packed = HashMap::with_capacity(values.len());
                for (key, value) in values {
                    packed.insert(key.clone(), self.pack(value, timeout)?);
                }
                self.inner
                    .set_many(&packed, Some(timeout.saturating_add(self.herd_timeout)))
                    .await
            }
            _ => self.inner.set_many(values, timeout).await,
        }
    }

    /// Re-arm a soft-expired entry: same stale payload, raw, grace-window TTL
    async fn rearm(&self, key: &str, payload: &Value) -> Result<()> {
        debug!(key, "re-arming soft-expired entry for the grace window");
        self.set_with(key, payload, Some(self.herd_timeout), false)
            .await
    }
}

#[async_trait]
impl StoreBackend for MintStore {
    /// Get with soft-expiry classification
    ///
    /// The first reader of a soft-expired entry gets a miss and re-arms the
    /// entry; subsequent readers within the grace window get the stale value
    /// as an ordinary hit.
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let Some(stored) = self.inner.get(key).await? else {
            return Ok(None);
        };
        let (payload, needs_refresh) = Self::unpack(stored, self.clock.now_epoch_secs());
        if needs_refresh {
            self.rearm(key, &payload).await?;
            return Ok(None);
        }
        Ok(Some(payload))
    }

    async fn set(&self, key: &str, value: &Value, timeout: Option<Duration>) -> Result<()> {
        self.set_with(key, value, timeout, true).await
    }

    async fn add(&self, key: &str, value: &Value, timeout: Option<Duration>) -> Result<bool> {
        match Self::herdable(timeout) {
            Some(timeout) => {
                let packed = self.pack(value, timeout)?;
                self.inner
                    .add(key, &packed, Some(timeout.saturating_add(self.herd_timeout)))
                    .await
            }
            None => self.inner.add(key, value, timeout).await,
        }
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

    /// Batch get with per-key soft-expiry classification
    ///
    /// All soft-expired entries in the batch are re-armed with a single
    /// batched raw write and reported as misses (omitted, like absent keys).
    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Value>> {
        let stored = self.inner.get_many(keys).await?;
        let now = self.clock.now_epoch_secs();

        let mut fresh = HashMap::with_capacity(stored.len());
        let mut stale = HashMap::new();
        for (key, value) in stored {
            let (payload, needs_refresh) = Self::unpack(value, now);
            if needs_refresh {
                stale.insert(key, payload);
            } else {
                fresh.insert(key, payload);
            }
        }

        if !stale.is_empty() {
            debug!(count = stale.len(), "re-arming soft-expired batch entries");
            self.set_many_with(&stale, Some(self.herd_timeout), false)
                .await?;
        }
        Ok(fresh)
    }

    async fn set_many(
        &self,
        values: &HashMap<String, Value>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        self.set_many_with(values, timeout, true).await
    }

    async fn delete_many(&self, keys: &[String]) -> Result<()> {
        self.inner.delete_many(keys).await
    }

    fn backend_name(&self) -> String {
        format!("mint+{}", self.inner.backend_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unpack_passes_raw_values_through() {
        let (value, refresh) = MintStore::unpack(json!("plain"), 1_000);
        assert_eq!(value, json!("plain"));
        assert!(!refresh);

        let shaped = json!({"marker": "not-the-marker", "payload": 1, "stale_at": 0});
        let (value, refresh) = MintStore::unpack(shaped.clone(), 1_000);
        assert_eq!(value, shaped);
        assert!(!refresh);
    }

    #[test]
    fn unpack_detects_fresh_and_stale_packed_values() {
        let packed = json!({"marker": HERD_MARKER, "payload": {"a": 1}, "stale_at": 2_000});
        let (value, refresh) = MintStore::unpack(packed.clone(), 1_000);
        assert_eq!(value, json!({"a": 1}));
        assert!(!refresh);

        let (value, refresh) = MintStore::unpack(packed, 3_000);
        assert_eq!(value, json!({"a": 1}));
        assert!(refresh);
    }

    #[test]
    fn unpack_rejects_extra_fields() {
        // An object with the packed fields plus extras is caller data
        let shaped = json!({
            "marker": HERD_MARKER,
            "payload": 1,
            "stale_at": 0,
            "extra": true,
        });
        let (value, refresh) = MintStore::unpack(shaped.clone(), 1_000);
        assert_eq!(value, shaped);
        assert!(!refresh);
    }

    #[test]
    fn unpack_rejects_non_integer_stale_at() {
        let shaped = json!({"marker": HERD_MARKER, "payload": 1, "stale_at": "soon"});
        let (value, refresh) = MintStore::unpack(shaped.clone(), 1_000);
        assert_eq!(value, shaped);
        assert!(!refresh);
    }

    #[test]
    fn herdable_filters_zero_and_none() {
        assert_eq!(MintStore::herdable(None), None);
        assert_eq!(MintStore::herdable(Some(Duration::ZERO)), None);
        assert_eq!(
            MintStore::herdable(Some(Duration::from_secs(20))),
            Some(Duration::from_secs(20))
        );
    }
}
