//! Tracing setup shared by the workspace binaries.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `default_directive` applies when it is
/// unset. Safe to call once per process, from `main`.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
