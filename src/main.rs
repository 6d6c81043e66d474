//! After-hours emergency intake service.
//!
//! Main entry point. Loads configuration, constructs the Airtable client,
//! and serves the intake and health endpoints until shutdown.

use std::sync::Arc;

use afterhours_airtable::AirtableClient;
use afterhours_api::{start_server, AppState, Config};
use afterhours_core::RealClock;
use anyhow::{Context, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting after-hours emergency intake service");

    // Load configuration from environment
    let config = Config::load()?;
    info!(
        host = %config.host,
        port = config.port,
        table = %config.afterhours_table_name,
        has_airtable_token = config.has_airtable_token(),
        has_base_id = config.has_base_id(),
        "Configuration loaded"
    );

    let client = AirtableClient::new(config.to_client_config())
        .context("Failed to construct Airtable client")?;

    let addr = config.parse_server_addr()?;
    let table = config.afterhours_table_name.clone();

    let state = AppState::new(Arc::new(config), Arc::new(client), Arc::new(RealClock::new()));

    info!(%addr, "Emergency intake is ready to receive tool calls");
    info!("  POST /emergency-webhook  - process emergency tool calls");
    info!("  GET  /health             - health check and config presence");
    info!(table = %table, "Target: Airtable call log");

    start_server(state, addr).await.context("HTTP server failed")?;

    info!("Emergency intake shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,afterhours=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
