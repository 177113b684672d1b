//! hyprbars: per-window title bars with buttons for Hyprland.
//!
//! Run with:  `RUST_LOG=info hyprbars`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("hyprbars v{} starting", env!("CARGO_PKG_VERSION"));

    hyprbars_host::run().await.map_err(Into::into)
}
