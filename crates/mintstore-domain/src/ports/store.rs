//! Store Backend Port
//!
//! Port for key-value store backends. The same trait is implemented by
//! concrete providers (memory, redis, null) and by the decorator layers
//! (fault-tolerant wrapper, mint cache), so decorators are drop-in
//! substitutes for the backend they wrap and compose by nesting in either
//! order.
//!
//! Values are JSON documents; timeouts are `Option<Duration>` where `None`
//! means the entry never expires. Every operation is fallible: failure is a
//! domain [`Error`](crate::error::Error), never a panic.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Key-value store port
///
/// # Implementations
///
/// - **Memory**: in-process store with per-entry TTL
/// - **Redis**: distributed store for multi-instance deployments
/// - **Null**: no-op store for testing
/// - **FaultTolerantStore**: decorator converting failures into misses
/// - **MintStore**: decorator adding thundering-herd protection
#[async_trait]
pub trait StoreBackend: Send + Sync + std::fmt::Debug {
    /// Get a value from the store
    ///
    /// # Returns
    /// The stored value if present and not expired, `None` otherwise
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Set a value in the store
    ///
    /// # Arguments
    /// * `timeout` - Seconds until the store evicts the entry; `None` keeps
    ///   the entry until it is deleted or evicted by capacity pressure
    async fn set(&self, key: &str, value: &Value, timeout: Option<Duration>) -> Result<()>;

    /// Store a value only if the key is not already present
    ///
    /// # Returns
    /// `true` if the value was stored, `false` if the key already existed
    async fn add(&self, key: &str, value: &Value, timeout: Option<Duration>) -> Result<bool>;

    /// Delete a value from the store
    ///
    /// # Returns
    /// `true` if the key was deleted, `false` if it did not exist
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Increment a counter value
    ///
    /// # Returns
    /// The new counter value, or `None` if the key does not exist
    async fn incr(&self, key: &str, delta: u64) -> Result<Option<i64>>;

    /// Decrement a counter value, flooring at zero
    ///
    /// # Returns
    /// The new counter value, or `None` if the key does not exist
    async fn decr(&self, key: &str, delta: u64) -> Result<Option<i64>>;

    /// Get a batch of values
    ///
    /// # Returns
    /// A map containing an entry for every key that was present; absent keys
    /// are omitted
    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Value>>;

    /// Set a batch of values, all with the same timeout
    async fn set_many(&self, values: &HashMap<String, Value>, timeout: Option<Duration>)
        -> Result<()>;

    /// Delete a batch of keys
    async fn delete_many(&self, keys: &[String]) -> Result<()>;

    /// Name/identifier of this backend implementation
    ///
    /// Decorators report the name of the backend they wrap, prefixed with
    /// their own (e.g. `"mint+fault_tolerant+memory"`).
    fn backend_name(&self) -> String;
}
