//! Tracing subscriber setup shared by both binaries.
//!
//! Logs go to stderr: the RPC bridge uses stdout for its protocol.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "copyme=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Calling it more than once is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
