//! Store configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default herd timeout in seconds
///
/// Grace window added to every herd-protected physical write beyond the
/// caller's requested timeout.
pub const DEFAULT_HERD_TIMEOUT_SECS: u64 = 60;

/// Default maximum value size accepted by the in-memory backend (1 MiB,
/// matching the memcached limit)
pub const DEFAULT_MAX_VALUE_BYTES: usize = 1_048_576;

/// Store backend providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreProviderKind {
    /// In-process store (DashMap)
    Memory,
    /// Distributed store (Redis)
    Redis,
    /// No-op store for tests and for disabling caching
    Null,
}

/// Store stack configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend provider
    pub provider: StoreProviderKind,

    /// Redis URL (for the redis provider)
    pub redis_url: Option<String>,

    /// Herd grace window in seconds
    pub herd_timeout_secs: u64,

    /// Wrap the backend in the fault-tolerant layer
    pub fault_tolerant: bool,

    /// Wrap the stack in the mint (herd protection) layer
    pub herd: bool,

    /// Maximum value size in bytes (in-memory backend)
    pub max_value_bytes: usize,
}

impl StoreConfig {
    /// Herd grace window as a [`Duration`]
    pub fn herd_timeout(&self) -> Duration {
        Duration::from_secs(self.herd_timeout_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProviderKind::Memory,
            redis_url: None,
            herd_timeout_secs: DEFAULT_HERD_TIMEOUT_SECS,
            fault_tolerant: true,
            herd: true,
            max_value_bytes: DEFAULT_MAX_VALUE_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = StoreConfig::default();
        assert_eq!(config.provider, StoreProviderKind::Memory);
        assert_eq!(config.herd_timeout_secs, 60);
        assert!(config.fault_tolerant);
        assert!(config.herd);
        assert_eq!(config.max_value_bytes, 1_048_576);
        assert_eq!(config.herd_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn provider_kind_serializes_lowercase() {
        let json = serde_json::to_string(&StoreProviderKind::Redis).unwrap();
        assert_eq!(json, "\"redis\"");
    }
}
