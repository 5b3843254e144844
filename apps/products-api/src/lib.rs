//! Product catalog HTTP service
//!
//! [`build_router`] takes the readiness check as a separate router, so the
//! same assembly runs against Postgres in production and against the
//! in-memory repository in tests.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use core_config::app_info;
use domain_products::{ProductRepository, ProductService};
use std::io;

/// Index page, `/products`, `/health`, the `ready` routes and Swagger UI, all behind
/// the shared tracing, security-header and compression layers.
///
/// `ready` carries the `/ready` check; pass `Router::new()` to leave it out.
pub fn build_router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    ready: Router,
    cors_allowed_origin: Option<&str>,
) -> io::Result<Router> {
    let apis = api::routes(service)
        .merge(health_router(app_info!()))
        .merge(ready);

    create_router::<openapi::ApiDoc>(apis, cors_allowed_origin)
}
