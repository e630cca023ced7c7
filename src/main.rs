//! Taskboard Backend - Rust Implementation
//!
//! A small JWT-protected CRUD service for tracked work items.

use taskboard::{api, core, db};

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (handles CLI args, env vars, and config file)
    let config = match core::config::Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Print to stderr since logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize logging system based on configuration
    let _logger = match core::Logger::init(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return Err(e);
        }
    };

    info!("Starting Taskboard Backend v{}", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = config.server.port,
        "Server configuration"
    );
    info!(path = ?config.database.path, "Database configuration");

    // Initialize database with bounded startup retries
    let db = Arc::new(connect_with_retries(&config).await?);
    info!("Database initialized successfully");

    // Seed the demo items when the collection is empty
    let item_repo = db::ItemRepository::new(db.clone());
    item_repo.seed_defaults().await?;

    // Initialize API server
    info!("Initializing HTTP server...");
    let server = api::ApiServer::new(config, db)?;

    info!("Taskboard Backend initialized successfully");

    // Start serving (this will block until shutdown signal)
    server.serve().await?;

    Ok(())
}

/// Open the database, retrying a bounded number of times before giving up
///
/// Pool construction runs the migrations, so a failure here covers both an
/// unreachable database file and a broken schema.
async fn connect_with_retries(config: &core::Config) -> Result<db::DatabaseManager> {
    let max_retries = config.database.startup_max_retries;
    let delay = std::time::Duration::from_secs(config.database.startup_retry_delay_secs);

    for attempt in 1..=max_retries {
        info!(attempt, max_retries, "Connecting to the database...");

        match db::DatabaseManager::new(
            &config.database.path,
            config.database.connection_pool_size as u32,
            std::time::Duration::from_millis(config.database.busy_timeout),
        ) {
            Ok(manager) => {
                info!("Database connection established");
                return Ok(manager);
            }
            Err(e) if attempt < max_retries => {
                warn!(attempt, error = %e, "Database connection failed, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Database unavailable after {} attempts: {}",
                    max_retries,
                    e
                ));
            }
        }
    }

    unreachable!("retry loop returns on success or final failure")
}
