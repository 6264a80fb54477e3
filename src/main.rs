// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::catalog_service::CatalogService;
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::backend_repository::BackendRepository;
use crate::infrastructure::config::{load_app_config, load_catalog_config};
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config().context("Failed to load config/solar")?;
    let catalog_config = load_catalog_config().context("Failed to load config/catalog")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(BackendRepository::new(app_config.backend.clone())?);

    // Create services (application layer)
    let catalog_service = CatalogService::new(catalog_config);
    let dashboard_service = DashboardService::new(
        repository,
        catalog_service.clone(),
        app_config.dashboard.device_energy_variable.clone(),
    );

    // Create application state
    let state = Arc::new(AppState {
        catalog_service,
        dashboard_service,
        defaults: app_config.dashboard.clone(),
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", app_config.server.bind))?;
    tracing::info!(
        "Starting solar-telemetry service on {} (backend {})",
        addr,
        app_config.backend.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
