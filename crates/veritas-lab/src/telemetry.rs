//! Tracing setup

use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber
///
/// `RUST_LOG` wins over `default_filter` when set. Returns `false` when a
/// global subscriber was already installed, in which case nothing changes.
///
/// # Examples
///
/// ```
/// veritas_lab::init_tracing("veritas=info");
/// // A second call is a no-op.
/// assert!(!veritas_lab::init_tracing("debug"));
/// ```
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
