//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

use crate::core::config::PlatformConfig;

/// Initialize the logging system from the `RUST_LOG` environment variable
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default filter
///
/// `RUST_LOG` still takes precedence when set. Calling this more than once is
/// harmless; only the first call installs a logger.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}

/// Initialize logging from the platform configuration
pub fn init_from_config(config: &PlatformConfig) {
    init_with_level(&config.log_level);
}

/// Logger for unit tests; output is captured by the test harness
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
