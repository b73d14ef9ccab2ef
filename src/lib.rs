pub mod app;
pub mod beehiiv_client;
pub mod config;
mod error;
pub mod web;

// re-export
pub use app::{serve, App, AppState};
pub use beehiiv_client::BeehiivClient;
pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Tracing setup used during development: human-readable, defaults to `debug`.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_target(false)
        .without_time()
        .init();
}

/// Tracing setup used in production, defaults to `info`.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
