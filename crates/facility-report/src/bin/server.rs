//! Upload server binary
//!
//! Run with: cargo run -p facility-report --bin facility-report-server

use facility_report::{config::AppConfig, server::Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facility_report=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load("facility-report.toml")?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Listen address: {}:{}", config.server.host, config.server.port);
    tracing::info!("  - Deletion failure policy: {:?}", config.upload.deletion_failure);
    if let Some(gcp) = &config.gcp {
        tracing::info!("  - Storage bucket: {}", gcp.storage_bucket);
    }

    let server = Server::new(config)?;

    println!("Server starting...");
    println!("  Upload: POST http://{}/upload", server.address());
    println!("  Health: GET  http://{}/health", server.address());

    server.start().await?;

    Ok(())
}
