//! Products API - in-memory inventory REST server

use axum_helpers::server::{create_production_app, ShutdownCoordinator};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let coordinator = ShutdownCoordinator::default();
    let state = AppState::new(config, coordinator.clone());

    let product_count = state.products.count_products().await?;
    info!(
        seeded = state.config.seed_sample_data,
        product_count, "Product store initialized"
    );

    let app = api::app(&state)?;

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let products = state.products.clone();
    create_production_app(app, &state.config.server, coordinator, async move {
        match products.count_products().await {
            Ok(count) => info!(product_count = count, "Discarding in-memory product store"),
            Err(e) => tracing::warn!("Could not read product store during shutdown: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
