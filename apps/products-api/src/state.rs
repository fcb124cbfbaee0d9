//! Application state management

use axum_helpers::ShutdownCoordinator;
use domain_products::{InMemoryProductRepository, ProductService};

use crate::config::Config;

pub type Products = ProductService<InMemoryProductRepository>;

/// Shared application state
///
/// Cloning is cheap: the service and the coordinator share their internals.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub products: Products,
    pub shutdown: ShutdownCoordinator,
}

impl AppState {
    /// Build the state, seeding the store when the config asks for it.
    pub fn new(config: Config, shutdown: ShutdownCoordinator) -> Self {
        let repository = if config.seed_sample_data {
            InMemoryProductRepository::with_sample_data()
        } else {
            InMemoryProductRepository::new()
        };

        Self {
            config,
            products: ProductService::new(repository),
            shutdown,
        }
    }
}
