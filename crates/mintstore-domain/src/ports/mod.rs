//! Port definitions
//!
//! Capability traits implemented by concrete backends and by the decorator
//! layers that wrap them.

pub mod store;

pub use store::StoreBackend;
