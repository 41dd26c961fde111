//! Store backend implementations

pub mod memory;
pub mod null;
pub mod redis;
