//! Tracing subscriber setup for the binaries.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "cafe_api=info,tower_http=info";

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .init();
}
