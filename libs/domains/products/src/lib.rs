//! Products Domain
//!
//! The product catalog: entity model, payload validation, list filters,
//! persistence and HTTP handlers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, not-found rules, filter short-circuit
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres/in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, Category, payload, filters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use domain_products::{
//!     handlers, repository::InMemoryProductRepository, service::ProductService, PRODUCTS_PATH,
//! };
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let app: Router = Router::new().nest(PRODUCTS_PATH, handlers::router(service));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;

/// Mount point of [`handlers::router`]; also the prefix of `Location` headers
pub const PRODUCTS_PATH: &str = "/products";

pub use error::{ProductError, ProductResult};
pub use models::{Category, Product, ProductFilter, ProductPayload};
pub use postgres::PgProductRepository;
pub use query::ProductQuery;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
