//! HTTP server for the IP2Data dashboard.
//!
//! One data endpoint, `GET /api/all`, which resolves the caller's public IP,
//! geolocates it, then fans out to the weather, air-quality and country
//! upstreams and merges everything into a single JSON payload.
//!
//! ## Endpoints
//! - `GET /api/all` - aggregated dashboard payload
//! - `GET /health` - health check
//!
//! Configuration is read from `config.toml` in the platform config
//! directory; defaults talk to the real public APIs.

mod handlers;

use anyhow::Context;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handlers::{AppState, get_all, health};
use ip2data_core::{Aggregator, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ip2data_server=info,ip2data_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let state = AppState { aggregator: Arc::new(Aggregator::from_config(&config)) };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let app = Router::new()
        .route("/api/all", get(get_all))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    tracing::info!("listening on {}", config.server.bind_addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
