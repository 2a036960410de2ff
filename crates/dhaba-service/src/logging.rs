//! # Logging Setup
//!
//! Tracing subscriber initialization shared by the app binary and the
//! seed/maintenance tools.

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=dhaba=trace` - Show trace for dhaba crates only
/// - Default: INFO level, dhaba crates at DEBUG, sqlx quiet
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dhaba=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
