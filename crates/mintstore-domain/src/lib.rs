//! Domain layer for mintstore
//!
//! Core types shared by every other crate in the workspace: the
//! [`StoreBackend`] port that concrete backends and decorators implement,
//! the [`Error`] type, the [`TimeSource`] clock port, and the store
//! configuration value objects.

pub mod clock;
pub mod config;
pub mod error;
pub mod ports;

pub use clock::{ManualClock, SystemClock, TimeSource};
pub use config::{StoreConfig, StoreProviderKind};
pub use error::{Error, Result};
pub use ports::store::StoreBackend;
