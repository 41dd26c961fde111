//! Store stack factory
//!
//! Assembles the decorator stack from configuration:
//! base provider -> fault-tolerant wrapper (optional) -> mint layer
//! (optional). The stack is built once and shared; callers hold it as an
//! `Arc<dyn StoreBackend>`.

use mintstore_domain::error::Result;
use mintstore_domain::{StoreBackend, StoreConfig, StoreProviderKind, SystemClock, TimeSource};
use mintstore_providers::{MemoryStore, NullStore, RedisStore};
use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::fault_tolerant::FaultTolerantStore;
use crate::mint::MintStore;

/// Store stack factory
#[derive(Debug, Clone, Default)]
pub struct StoreFactory;

impl StoreFactory {
    /// Build a store stack from configuration
    pub fn create_from_config(config: &StoreConfig) -> Result<Arc<dyn StoreBackend>> {
        Self::create_with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Build a store stack from configuration with an explicit time source
    ///
    /// The clock is shared by every layer that makes expiry decisions.
    pub fn create_with_clock(
        config: &StoreConfig,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Arc<dyn StoreBackend>> {
        ConfigLoader::validate(config)?;

        let base: Arc<dyn StoreBackend> = match config.provider {
            StoreProviderKind::Memory => Arc::new(
                MemoryStore::with_clock(clock.clone())
                    .with_max_value_bytes(config.max_value_bytes),
            ),
            StoreProviderKind::Redis => {
                // validate() guarantees the URL is present
                let url = config.redis_url.as_deref().unwrap_or_default();
                Arc::new(RedisStore::new(url)?)
            }
            StoreProviderKind::Null => Arc::new(NullStore::new()),
        };

        let mut stack = base;
        if config.fault_tolerant {
            stack = Arc::new(FaultTolerantStore::new(stack));
        }
        if config.herd {
            stack = Arc::new(
                MintStore::new(stack)
                    .with_herd_timeout(config.herd_timeout())
                    .with_clock(clock),
            );
        }
        Ok(stack)
    }

    /// Create the default stack over an in-memory backend
    pub fn create_memory() -> Result<Arc<dyn StoreBackend>> {
        Self::create_from_config(&StoreConfig::default())
    }

    /// Create the default stack over a Redis backend
    pub fn create_redis(url: &str) -> Result<Arc<dyn StoreBackend>> {
        Self::create_from_config(&StoreConfig {
            provider: StoreProviderKind::Redis,
            redis_url: Some(url.to_string()),
            ..StoreConfig::default()
        })
    }

    /// Create a null stack (for tests and for disabling caching)
    pub fn create_null() -> Result<Arc<dyn StoreBackend>> {
        Self::create_from_config(&StoreConfig {
            provider: StoreProviderKind::Null,
            ..StoreConfig::default()
        })
    }
}
