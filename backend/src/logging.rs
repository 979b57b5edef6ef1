//! Logging bootstrap for hosts embedding the care backend.
//!
//! The domain logs through the `log` facade. Hosts call [`init_logging`] once
//! at startup; `RUST_LOG` takes precedence over the level passed in.

use env_logger::{Builder, Env};
use log::{info, LevelFilter};

/// Returns the default log level for the current build mode
pub fn default_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initialize `env_logger`.
///
/// Returns `false` when a logger was already installed; repeated calls are
/// harmless.
pub fn init_logging(level: Option<LevelFilter>) -> bool {
    let default_filter = level.unwrap_or_else(default_log_level).to_string().to_lowercase();
    let installed = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if installed {
        info!("Logging initialized, version={}", env!("CARGO_PKG_VERSION"));
    }
    installed
}

/// Logger for unit tests: captured by the test harness, never fails
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
