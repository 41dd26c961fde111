//! Structured logging with tracing
//!
//! Thin initialization helper over tracing-subscriber. The fault-tolerant
//! wrapper is the main log producer: one error record per swallowed backend
//! failure.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "MINTSTORE_LOG";

/// Initialize logging for the process
///
/// Filter comes from `MINTSTORE_LOG` when set, otherwise the given default
/// directive. Safe to call once per process; subsequent calls are no-ops.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // try_init so embedding applications that already installed a subscriber
    // are left alone
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
