use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI, ReDoc, RapiDoc, Scalar) backed by
///   `/api-docs/openapi.json`
/// - API routes nested under `/api`
/// - Common middleware (tracing, security headers, compression)
/// - CORS, only when `cors_allowed_origins` is non-empty
/// - JSON 404 fallback handler
///
/// Health endpoints are not included; merge `health_router()` and the app's
/// own readiness route into the result.
///
/// # Errors
/// Returns `InvalidInput` if one of the CORS origins is not a valid header value.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/v1/products", products_router);
/// let router = create_router::<ApiDoc>(api_routes, &config.server.cors_allowed_origins)?;
/// ```
pub fn create_router<T>(apis: Router, cors_allowed_origins: &[String]) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    let router = if cors_allowed_origins.is_empty() {
        router
    } else {
        info!(origins = ?cors_allowed_origins, "CORS enabled");
        router.layer(create_cors_layer(cors_allowed_origins)?)
    };

    Ok(router.layer(CompressionLayer::new()))
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// Serves `router` on `server_config.address()` until the coordinator
/// observes SIGINT/SIGTERM (or `shutdown()` is called), lets in-flight
/// requests drain, then runs `cleanup` bounded by
/// `server_config.shutdown_timeout`.
///
/// # Example
/// ```ignore
/// let coordinator = ShutdownCoordinator::default();
/// create_production_app(router, &config, coordinator, async move {
///     info!("closing resources");
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    coordinator: ShutdownCoordinator,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    let shutdown_timeout = server_config.shutdown_timeout;
    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "Test API"))]
    struct TestDoc;

    fn api() -> Router {
        Router::new().route("/ping", get(|| async { "pong" }))
    }

    async fn get_uri(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_routes_nested_under_api() {
        let router = create_router::<TestDoc>(api(), &[]).unwrap();
        let (status, body) = get_uri(router, "/api/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"pong");
    }

    #[tokio::test]
    async fn test_unknown_route_uses_json_fallback() {
        let router = create_router::<TestDoc>(api(), &[]).unwrap();
        let (status, body) = get_uri(router, "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let router = create_router::<TestDoc>(api(), &[]).unwrap();
        let (status, body) = get_uri(router, "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["info"]["title"], "Test API");
    }

    #[test]
    fn test_invalid_cors_origin_fails_router_creation() {
        let origins = vec!["not\na header".to_string()];
        assert!(create_router::<TestDoc>(api(), &origins).is_err());
    }

    #[tokio::test]
    async fn test_production_app_runs_cleanup_after_shutdown() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            shutdown_timeout: Duration::from_secs(1),
            cors_allowed_origins: Vec::new(),
        };
        let coordinator = ShutdownCoordinator::default();
        let cleaned = Arc::new(AtomicBool::new(false));

        let server = {
            let coordinator = coordinator.clone();
            let cleaned = cleaned.clone();
            tokio::spawn(async move {
                create_production_app(api(), &config, coordinator, async move {
                    cleaned.store(true, Ordering::SeqCst);
                })
                .await
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        coordinator.shutdown();

        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server should stop after shutdown")
            .unwrap()
            .unwrap();
        assert!(cleaned.load(Ordering::SeqCst));
    }
}
