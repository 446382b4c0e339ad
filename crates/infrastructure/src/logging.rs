//! Tracing initialisation for test binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global subscriber writing through the test harness's capture.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Safe to call from
/// every test; only the first call installs anything. Returns true if this
/// call installed the subscriber.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
        .is_ok()
}
