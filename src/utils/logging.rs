//! Conditional logging macros gated on a module-level `ENABLE_LOGS` flag.
//!
//! Engine code runs on every re-fetch of a pipeline preview, so the noisy
//! per-snapshot traces stay compiled out unless a module opts in.
//!
//! Usage:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_debug, log_warn};
//!
//! log_debug!("built {} lanes", lanes.len());
//! ```

/// Debug-level log that only fires when the calling module sets `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

/// Info-level log that only fires when the calling module sets `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warnings are always emitted; `ENABLE_LOGS` only controls whether the
/// warning is attributed to the calling module or to the crate root target.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        } else {
            log::warn!(target: "stagelens", $($arg)*);
        }
    };
}

/// Install the process logger. Reads `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; only the first call installs a logger.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
