//! HTTP handlers for Products API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestJsonResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{Product, ProductPatch, ProductRequest};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        patch_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductRequest, ProductPatch),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestJsonResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<ProductRequest>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(&id).await?;
    Ok(Json(product))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ProductRequest>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(&id, input).await?;
    Ok(Json(product))
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Product patched successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<ProductPatch>,
) -> ProductResult<Json<Product>> {
    let product = service.patch_product(&id, patch).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted, or was already absent"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
