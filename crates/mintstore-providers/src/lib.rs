//! Store backend providers for mintstore
//!
//! Concrete implementations of the [`StoreBackend`] port from
//! `mintstore-domain`:
//!
//! - [`MemoryStore`] - in-process store with per-entry TTL
//! - [`RedisStore`] - distributed store backed by Redis
//! - [`NullStore`] - no-op store for testing and for disabling caching
//!
//! [`StoreBackend`]: mintstore_domain::StoreBackend

pub mod store;

pub use store::memory::MemoryStore;
pub use store::null::NullStore;
pub use store::redis::RedisStore;
