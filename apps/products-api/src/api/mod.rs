//! API routes module

pub mod health;

use axum::{middleware, routing::get, Router};
use axum_helpers::security_headers;
use axum_helpers::server::{create_router, health_router};
use domain_products::handlers;
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/v1/products", handlers::router(state.products.clone()))
}

/// Full application router: API, docs, liveness and readiness
pub fn app(state: &AppState) -> io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state), &state.config.server.cors_allowed_origins)?;

    let probes = Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state.clone())
        .merge(health_router(state.config.app))
        .layer(middleware::from_fn(security_headers));

    Ok(router.merge(probes))
}
