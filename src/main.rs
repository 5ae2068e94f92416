// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::application::chart_service::TrafficChartService;
use crate::infrastructure::config::load_traffic_config;
use crate::infrastructure::memory_store::InMemoryTrafficStore;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, list_routes, record_traffic, traffic_chart};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_traffic_config()?;
    let settings = config.normalization.to_settings();

    // Create repository (infrastructure layer)
    let repository = Arc::new(InMemoryTrafficStore::new(
        config.routes.iter().map(|route| route.to_route()),
        config.recorder.bucket(),
        config.recorder.max_points,
    ));

    // Create services (application layer)
    let chart_service = TrafficChartService::new(repository, settings);

    // Create application state
    let state = Arc::new(AppState { chart_service });

    // Build router (presentation layer)
    // JSON bodies are compressed in the response builders, so no CompressionLayer here
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/routes", get(list_routes))
        .route("/routes/:id/traffic", get(traffic_chart).post(record_traffic))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server.address;
    tracing::info!(
        "Starting route-traffic service on {} (window {}s, tick {}s, smoothing {})",
        addr,
        settings.window.num_seconds(),
        settings.tick.num_seconds(),
        settings.smoothing_window
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
