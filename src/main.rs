//! marvin - IRC bot binary.
//!
//! Usage: `marvin [config.toml]` (defaults to `marvin.toml`).

use std::sync::Arc;

use marvin::responders::build_registry;
use marvin::{Config, run_forever};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "marvin.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        server = %config.irc.server,
        port = config.irc.port,
        nick = %config.irc.nick,
        channel = ?config.irc.channel,
        "Starting marvin"
    );

    let registry = build_registry(&config);
    run_forever(Arc::new(config), registry).await?;

    info!("Bye");
    Ok(())
}
