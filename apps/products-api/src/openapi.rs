//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "1.0",
        description = "RESTful API for managing an in-memory product inventory",
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v1/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;
