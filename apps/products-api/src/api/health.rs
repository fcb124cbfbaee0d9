//! Readiness endpoint backed by real checks

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};

use crate::state::AppState;

/// Readiness check endpoint.
///
/// Reports `503` once a graceful shutdown has started so load balancers stop
/// routing new traffic while in-flight requests drain.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "store",
            Box::pin(async {
                state
                    .products
                    .count_products()
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("Store check failed: {}", e))
            }),
        ),
        (
            "server",
            Box::pin(async {
                if state.shutdown.is_shutting_down() {
                    Err("shutdown in progress".to_string())
                } else {
                    Ok(())
                }
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
