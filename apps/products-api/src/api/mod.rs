use axum::{Router, routing::get};
use domain_products::{PRODUCTS_PATH, ProductRepository, ProductService, handlers};

pub mod health;
pub mod index;

use crate::state::AppState;

/// Stateless routes: the admin page and the products resource
pub fn routes<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(index::index_page))
        .nest(PRODUCTS_PATH, handlers::router(service))
}

/// `/ready`, backed by a real database check
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
