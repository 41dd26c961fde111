//! mintstore - fault-tolerant, herd-protected caching layer
//!
//! Two independently composable decorators over a key-value store port:
//!
//! - [`FaultTolerantStore`] converts any backend failure into the
//!   operation's neutral result (a miss or a no-op), logging one error
//!   record per failing call.
//! - [`MintStore`] adds thundering-herd protection: values are packed with a
//!   soft-expiry instant and stored with an extended physical TTL; the first
//!   reader past the soft expiry takes a deliberate miss and re-arms the
//!   entry so other readers keep hitting while the value is regenerated.
//!
//! Both implement the same [`StoreBackend`] port as the concrete providers
//! (memory, redis, null), so they nest in either order. [`StoreFactory`]
//! assembles the usual stack (mint over fault-tolerant over base) from a
//! [`StoreConfig`].
//!
//! ```no_run
//! use mintstore::{StoreBackend, StoreConfig, StoreFactory};
//! use serde_json::json;
//! use std::time::Duration;
//!
//! # async fn demo() -> mintstore::Result<()> {
//! let store = StoreFactory::create_from_config(&StoreConfig::default())?;
//! store.set("greeting", &json!("hello"), Some(Duration::from_secs(300))).await?;
//! let value = store.get("greeting").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod factory;
pub mod fault_tolerant;
pub mod logging;
pub mod mint;

use std::time::Duration;

/// Default herd grace window
pub const DEFAULT_HERD_TIMEOUT: Duration =
    Duration::from_secs(mintstore_domain::config::DEFAULT_HERD_TIMEOUT_SECS);

pub use config::ConfigLoader;
pub use factory::StoreFactory;
pub use fault_tolerant::FaultTolerantStore;
pub use logging::init_logging;
pub use mint::{MintStore, HERD_MARKER};

// Re-export the domain surface so the facade crate is self-sufficient
pub use mintstore_domain::{
    Error, ManualClock, Result, StoreBackend, StoreConfig, StoreProviderKind, SystemClock,
    TimeSource,
};
pub use mintstore_providers::{MemoryStore, NullStore, RedisStore};
