/// Database connection management and schema creation
pub mod database;

/// Application settings from environment variables and hrtrack.toml
pub mod settings;

use tracing_subscriber::EnvFilter;

/// Initializes tracing for a host process. Respects `RUST_LOG`, defaulting
/// to `info`. Call once, as early as possible; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
