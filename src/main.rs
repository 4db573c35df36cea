// SPDX-License-Identifier: MIT

//! Chirper API server.

use chirper::{config::Config, db::Store, middleware::metrics::HitCounter, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Chirper API");

    // Open (or create) the database file
    let db = Store::open(&config.database_path).expect("Failed to open database file");
    tracing::info!(path = %config.database_path, "Database ready");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        hits: HitCounter::default(),
    });

    // Build router
    let app = chirper::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize logging with an env-filter on top of the crate default.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chirper=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
