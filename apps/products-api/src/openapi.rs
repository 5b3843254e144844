//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Product Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        version = "0.1.0",
        description = "Create, read, update, delete and search catalog products"
    ),
    nest(
        (path = "/products", api = domain_products::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
