//! Hearth - REST backend for the wellness companion

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hearth::config::Args;
use hearth::server;
use hearth::store::{spawn_autosave, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("hearth={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Print startup banner
    info!("======================================");
    info!("  Hearth - Wellness Companion Backend");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("Data file: {}", args.data_file.display());
    info!("Snapshot interval: {}s", args.save_interval_secs);
    info!(
        "Mode: {}",
        if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" }
    );
    info!("======================================");

    // Load state from the last snapshot (or seed a fresh catalog)
    let store = Arc::new(Store::open(args.data_file.clone()).await);
    {
        let data = store.read().await;
        info!(
            "State ready: {} users, {} check-ins, {} posts",
            data.users.len(),
            data.checkins.len(),
            data.community_posts.len()
        );
    }

    // Periodic safety-net snapshot
    let autosave = spawn_autosave(Arc::clone(&store), args.save_interval_secs);

    // Run the server until a shutdown signal arrives
    let state = Arc::new(server::AppState::new(args, Arc::clone(&store)));
    tokio::select! {
        result = server::run(state) => {
            if let Err(e) = result {
                error!("Server error: {:?}", e);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, saving state...");
        }
    }

    // Final snapshot before exit
    autosave.abort();
    store.persist().await;
    info!("State saved. Goodbye!");

    Ok(())
}
