//! Installs the global tracing subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a pretty-printing subscriber filtered through `RUST_LOG`,
/// defaulting to `info`.
///
/// Call once at startup; a second call panics because the global
/// subscriber is already set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
