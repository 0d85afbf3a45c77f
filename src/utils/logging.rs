//! Logging utilities
//!
//! Logging goes through the `log` facade; the binary installs `env_logger`.

use env_logger::Env;

/// Installs the logger. `RUST_LOG` overrides the default `info` level.
pub fn setup_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
