//! Time source port
//!
//! Soft and hard expiry are both computed against wall-clock seconds, so the
//! clock is a port: production code uses [`SystemClock`], tests drive a
//! [`ManualClock`] to replay expiry scenarios without sleeping.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Clock port used for expiry decisions
pub trait TimeSource: Send + Sync + std::fmt::Debug {
    /// Current time as whole seconds since the Unix epoch
    fn now_epoch_secs(&self) -> i64;
}

/// Wall-clock time source backed by chrono
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock
    pub fn new() -> Self {
        Self
    }

    /// Convenience constructor returning a shared handle
    pub fn shared() -> Arc<dyn TimeSource> {
        Arc::new(Self)
    }
}

impl TimeSource for SystemClock {
    fn now_epoch_secs(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Manually driven time source
///
/// Starts at an arbitrary instant and only moves when told to. Shared between
/// a store backend and the mint layer in tests so both observe the same
/// frozen clock.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a manual clock at the given epoch instant
    pub fn new(epoch_secs: i64) -> Self {
        Self {
            now: AtomicI64::new(epoch_secs),
        }
    }

    /// Create a manual clock starting at the current wall-clock time
    pub fn at_now() -> Self {
        Self::new(Utc::now().timestamp())
    }

    /// Move the clock forward
    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set the clock to an absolute instant
    pub fn set(&self, epoch_secs: i64) {
        self.now.store(epoch_secs, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now_epoch_secs(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_and_sets() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now_epoch_secs(), 1_000);
        clock.advance(25);
        assert_eq!(clock.now_epoch_secs(), 1_025);
        clock.set(500);
        assert_eq!(clock.now_epoch_secs(), 500);
    }

    #[test]
    fn system_clock_is_monotonic_enough() {
        let clock = SystemClock::new();
        let a = clock.now_epoch_secs();
        let b = clock.now_epoch_secs();
        assert!(b >= a);
    }
}
