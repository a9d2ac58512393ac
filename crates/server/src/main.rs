//! Prepdesk REST API Server
//!
//! Serves the content shelf over HTTP: public browse endpoints for students
//! and role-checked admin endpoints for content management.

mod routes;

use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use prepdesk::access::AccessPolicy;
use prepdesk::commands::CommandExecutor;
use prepdesk::config::PrepConfig;
use prepdesk::storage::{JsonFileStorage, MaterialStore};

/// Prepdesk API server
#[derive(Parser)]
#[command(name = "prepdesk-server")]
struct Args {
    /// Data directory of an initialized shelf
    #[arg(long, env = "PREPDESK_DATA_DIR", default_value = ".prepdesk")]
    data_dir: String,

    /// Listen address (overrides [server].addr from config.toml)
    #[arg(long, env = "PREPDESK_ADDR")]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();

    info!("Starting prepdesk API server...");

    // Initialize storage and command executor
    let storage = JsonFileStorage::new(&args.data_dir);

    // Validate repository exists
    storage.validate().map_err(|e| {
        anyhow::anyhow!(
            "Failed to initialize storage: {}\n\n\
             The server requires an initialized shelf.\n\
             Run 'prepdesk init' in the repository directory, or set PREPDESK_DATA_DIR to point to an existing shelf.",
            e
        )
    })?;

    info!("Using shelf at: {}", args.data_dir);

    let config = PrepConfig::load(storage.root())?;
    let policy = AccessPolicy::from_config(&config);
    if !policy.has_admins() {
        info!("No admins configured; admin endpoints are disabled until [access] admins is set");
    }

    let executor = CommandExecutor::new(storage);
    let state = Arc::new(routes::AppState { executor, policy });

    // Build CORS layer for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .nest("/api", routes::create_routes(state))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    // Start server
    let addr = args.addr.unwrap_or_else(|| config.server().addr());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
